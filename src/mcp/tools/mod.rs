// src/mcp/tools/mod.rs
// Tool implementations. Each returns a JSON envelope: Ok for success, Err for failure.

pub mod sections;
