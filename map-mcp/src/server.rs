//! JSON-RPC protocol handling
//!
//! Requests arrive one per line; each answer is written as one line. Logs
//! go to stderr so the output stream carries protocol traffic only.

use std::sync::Arc;

use map_client::{MapSession, ResortApi};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{McpError, McpResult};
use crate::resources::{self, get_resource_definitions};
use crate::schema::SchemaRegistry;
use crate::tools::{self, get_tool_definitions, ToolCall, ToolDefinition, ToolResult};
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION, VIEW_STATE_URI, WIDGET_URI};

/// JSON-RPC request
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// `None` only when the member is absent; `"id": null` is kept
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: impl Into<Value>, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: Some("2.0".to_string()),
            id: Some(id.into()),
            method: method.to_string(),
            params,
        }
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC response
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    /// Null when the request id could not be read
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(RpcError { code, message }),
        }
    }

    fn from_error(id: Value, err: &McpError) -> Self {
        Self::failure(id, err.error_code(), err.to_string())
    }
}

/// The tool server: one map session plus the tool catalogue
pub struct McpServer {
    session: MapSession,
    tools: Vec<ToolDefinition>,
    schemas: SchemaRegistry,
    widget_html: Option<String>,
}

impl McpServer {
    /// Server over a fresh, empty view
    pub fn new(api: Arc<dyn ResortApi>) -> McpResult<Self> {
        Self::with_session(MapSession::new(api))
    }

    pub fn with_session(session: MapSession) -> McpResult<Self> {
        let tools = get_tool_definitions();
        let schemas = SchemaRegistry::compile(&tools)?;
        Ok(Self {
            session,
            tools,
            schemas,
            widget_html: None,
        })
    }

    /// Serve this document as the map widget resource
    pub fn with_widget_html(mut self, html: impl Into<String>) -> Self {
        self.widget_html = Some(html.into());
        self
    }

    pub fn session(&self) -> &MapSession {
        &self.session
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Serve over stdin/stdout until stdin closes
    pub async fn run_stdio(&self) -> McpResult<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve line-delimited JSON-RPC until the reader is exhausted
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` when nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                return Some(RpcResponse::failure(Value::Null, -32700, format!("Parse error: {}", e)));
            }
        };

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<RpcRequest>(message) {
            Ok(request) => self.handle_message(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                Some(RpcResponse::failure(id, -32600, format!("Invalid Request: {}", e)))
            }
        }
    }

    /// Notifications carry no id and get no response
    pub async fn handle_message(&self, request: RpcRequest) -> Option<RpcResponse> {
        if request.id.is_none() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }
        Some(self.handle_request(request).await)
    }

    /// Handle a request
    pub async fn handle_request(&self, request: RpcRequest) -> RpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(request.params).await,
            "resources/list" => Ok(self.handle_resources_list()),
            "resources/read" => self.handle_resources_read(request.params).await,
            other => {
                return RpcResponse::failure(id, -32601, format!("Method not found: {}", other));
            }
        };

        match result {
            Ok(value) => RpcResponse::success(id, value),
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                RpcResponse::from_error(id, &e)
            }
        }
    }

    /// Validate and run one tool call
    ///
    /// Schema violations and API or view failures come back as a result
    /// with `isError` set; an unknown tool is an error of the call itself.
    pub async fn call_tool(&self, call: &ToolCall) -> McpResult<ToolResult> {
        tracing::info!(tool = %call.name, "tool call");

        let outcome = match self.schemas.validate(&call.name, &call.arguments()) {
            Ok(()) => tools::dispatch(&self.session, call).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => Ok(result),
            Err(e) if e.is_tool_error() => {
                tracing::warn!(tool = %call.name, error = %e, "tool failed");
                Ok(ToolResult::error(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            },
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "instructions": "Search resorts with map_search to show them on the map, then use map_select_hotel, map_set_viewport and map_view_state to steer and inspect the view."
        })
    }

    fn handle_tools_list(&self) -> Value {
        json!({ "tools": self.tools })
    }

    async fn handle_tools_call(&self, params: Value) -> McpResult<Value> {
        let call: ToolCall =
            serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;
        let result = self.call_tool(&call).await?;
        Ok(serde_json::to_value(result)?)
    }

    fn handle_resources_list(&self) -> Value {
        json!({ "resources": get_resource_definitions(self.widget_html.is_some()) })
    }

    async fn handle_resources_read(&self, params: Value) -> McpResult<Value> {
        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::InvalidParams("uri is required".to_string()))?;

        let content = match (uri, self.widget_html.as_deref()) {
            (VIEW_STATE_URI, _) => resources::read_view_state(&self.session).await?,
            (WIDGET_URI, Some(html)) => resources::read_widget(html),
            _ => return Err(McpError::ResourceNotFound(uri.to_string())),
        };

        Ok(json!({ "contents": [content] }))
    }
}
