//! Tool implementations
//!
//! These are the tools exposed to agents. Catalog and booking tools pass
//! through to the hotel API; map tools also drive the shared view state.

pub mod booking;
pub mod catalog;
pub mod map;

use map_client::MapSession;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{McpError, McpResult};
use crate::WIDGET_URI;

/// Tool definition as listed to agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Description shown to the agent
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,

    /// Host hints, such as the widget that renders the result
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ToolDefinition {
    pub(crate) fn new(name: &str, title: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            input_schema,
            meta: None,
        }
    }

    /// Mark the tool as rendered by the map widget
    pub(crate) fn with_widget(mut self) -> Self {
        self.meta = Some(json!({
            "ui": { "resourceUri": WIDGET_URI },
            "openai/outputTemplate": WIDGET_URI
        }));
        self
    }

    pub fn renders_widget(&self) -> bool {
        self.meta.is_some()
    }
}

/// Tool call request
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Arguments, with a missing or null value read as `{}`
    pub fn arguments(&self) -> Value {
        match &self.arguments {
            Value::Null => json!({}),
            other => other.clone(),
        }
    }
}

/// Tool call response
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

impl ToolResult {
    /// Structured data with no text content
    pub fn structured(data: Value) -> Self {
        Self {
            content: Vec::new(),
            structured_content: Some(data),
            is_error: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ToolContent::text(text));
        self
    }

    /// A failed call, reported to the agent rather than as a protocol error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(message)],
            structured_content: None,
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        catalog::ping_tool(),
        map::map_search_tool(),
        map::ui_demo_load_tool(),
        catalog::list_hotels_tool(),
        catalog::get_hotel_tool(),
        booking::get_quote_tool(),
        catalog::search_tool(),
        catalog::fetch_tool(),
        map::set_viewport_tool(),
        map::select_hotel_tool(),
        map::close_detail_tool(),
        map::view_state_tool(),
    ]
}

/// Run a tool whose arguments already passed schema validation
pub async fn dispatch(session: &MapSession, call: &ToolCall) -> McpResult<ToolResult> {
    let args = call.arguments();
    match call.name.as_str() {
        "ping" => catalog::ping(parse(args)?),
        "list_hotels" => catalog::list_hotels(session, parse(args)?).await,
        "get_hotel" => catalog::get_hotel(session, parse(args)?).await,
        "search" => catalog::search(session, parse(args)?).await,
        "fetch" => catalog::fetch(session, parse(args)?).await,
        "get_quote" => booking::get_quote(session, parse(args)?).await,
        "map_search" => map::map_search(session, parse(args)?).await,
        "ui_demo_load" => map::ui_demo_load(session, parse(args)?).await,
        "map_set_viewport" => map::set_viewport(session, parse(args)?).await,
        "map_select_hotel" => map::select_hotel(session, parse(args)?).await,
        "map_close_detail" => map::close_detail(session).await,
        "map_view_state" => map::view_state(session).await,
        other => Err(McpError::ToolNotFound(other.to_string())),
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> McpResult<T> {
    serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))
}
