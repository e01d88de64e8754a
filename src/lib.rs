//! mcp-kvn library
//!
//! This crate provides MCP tools that render prompts for a downstream model:
//! - `summarize-bg`: Extract a board game rulebook PDF (path or URL) into a
//!   Setup/Guide summary prompt
//! - `generate-feedback`: Turn notes about a person into a peer feedback prompt

pub mod error;
pub mod pdf;
pub mod prompt;
pub mod server;
pub mod source;
pub mod tools;

pub use error::{Error, ErrorKind, Result};
pub use server::{run_server, run_server_with_config, KvnServer, ServerConfig};
pub use tools::{GenerateFeedbackParams, SummarizeBgParams, ToolCall};
