//! MCP server for the Yandex Direct and Yandex Metrika APIs.
//!
//! Exposes 33 tools (campaigns, ad groups, ads, keywords and statistics of
//! Direct; counters, goals and reports of Metrika) over JSON-RPC 2.0 stdio
//! transport, compatible with any MCP-aware AI agent.

pub mod client;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod protocol;
pub mod registry;
pub mod render;
pub mod server;

pub mod schema;
