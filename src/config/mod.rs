// src/config/mod.rs
// Configuration loading

pub mod env;
pub mod file;

pub use env::{ConfigValidation, Credentials, EnvConfig, ResolvedSettings};
pub use file::FileConfig;

/// Load `.env` files: the working directory first, then ~/.testrail-mcp/.env.
/// dotenvy never overwrites variables that are already set.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(FileConfig::config_dir().join(".env"));
}
