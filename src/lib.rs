// src/lib.rs
// TestRail MCP server library

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod sections;
pub mod types;

pub use client::TestRailClient;
pub use error::{Result, TestRailError};
