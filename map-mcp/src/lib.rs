//! Resort Map Tool Server Library
//!
//! This crate implements a JSON-RPC tool server that lets agents search
//! the hotel API and drive a shared map view.
//!
//! ## Architecture
//!
//! ```text
//! Agent (chat host, inspector, etc.)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │   Tool Server   │ ◄── This crate
//! │                 │
//! │  ┌───────────┐  │
//! │  │   Tools   │  │ - ping, list_hotels, get_hotel, get_quote
//! │  │           │  │ - search, fetch
//! │  │           │  │ - map_search, ui_demo_load
//! │  │           │  │ - map_set_viewport, map_select_hotel
//! │  │           │  │ - map_close_detail, map_view_state
//! │  └───────────┘  │
//! │                 │
//! │  ┌───────────┐  │
//! │  │ Resources │  │ - map://view/state
//! │  │           │  │ - ui://widget/resort-map.html
//! │  └───────────┘  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │   map-client    │ ───▶ │    hotel API    │
//! └────────┬────────┘      └─────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │    map-core     │
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use map_client::{ClientConfig, HttpResortApi};
//! use map_mcp::McpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpResortApi::new(ClientConfig::from_env()?)?;
//!     let server = McpServer::new(Arc::new(api))?;
//!     server.run_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod resources;
pub mod schema;
pub mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use server::{McpServer, RpcError, RpcRequest, RpcResponse};
pub use tools::{ToolCall, ToolDefinition, ToolResult};

/// Server metadata for the protocol handshake
pub const SERVER_NAME: &str = "resort-map";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// URI of the map widget resource
pub const WIDGET_URI: &str = "ui://widget/resort-map.html";
/// MIME type hosts expect for widget documents
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
/// URI of the view snapshot resource
pub const VIEW_STATE_URI: &str = "map://view/state";
