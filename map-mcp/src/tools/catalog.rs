//! Catalog tools: connectivity, listing, lookup and connector-style search

use map_client::{HotelQuery, MapSession};
use map_core::Hotel;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{ToolDefinition, ToolResult};
use crate::error::McpResult;

/// Input schema shared by `list_hotels` and the map search tools
pub(crate) fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "default": "",
                "description": "Free-text search"
            },
            "country": { "type": "string" },
            "region": { "type": "string" },
            "themes": {
                "type": "array",
                "items": { "type": "string" }
            },
            "limit": {
                "type": "integer",
                "minimum": 1,
                "maximum": 200,
                "default": 100
            }
        }
    })
}

/// ping tool definition
pub fn ping_tool() -> ToolDefinition {
    ToolDefinition::new(
        "ping",
        "Ping",
        "Connectivity test.",
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string", "default": "pong" }
            }
        }),
    )
}

/// list_hotels tool definition
pub fn list_hotels_tool() -> ToolDefinition {
    ToolDefinition::new(
        "list_hotels",
        "List hotels/resorts",
        "Lists hotels/resorts from the REST API.",
        list_schema(),
    )
}

/// get_hotel tool definition
pub fn get_hotel_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_hotel",
        "Get hotel/resort by id",
        "Fetches a single hotel/resort.",
        json!({
            "type": "object",
            "required": ["hotel_id"],
            "properties": {
                "hotel_id": { "type": "string" }
            }
        }),
    )
}

/// search tool definition
pub fn search_tool() -> ToolDefinition {
    ToolDefinition::new(
        "search",
        "Search hotels (connector-style)",
        "Returns id/title/snippet/url results.",
        json!({
            "type": "object",
            "required": ["query"],
            "properties": {
                "query": { "type": "string" },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 50,
                    "default": 10
                }
            }
        }),
    )
}

/// fetch tool definition
pub fn fetch_tool() -> ToolDefinition {
    ToolDefinition::new(
        "fetch",
        "Fetch hotel (connector-style)",
        "Returns JSON text blob by id.",
        json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "string" }
            }
        }),
    )
}

/// Input for ping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingInput {
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_message() -> String { "pong".to_string() }

/// Input for get_hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHotelInput {
    pub hotel_id: String,
}

/// Input for search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInput {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

fn default_search_limit() -> u32 { 10 }

/// Input for fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchInput {
    pub id: String,
}

/// One connector-style search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub url: Value,
    pub metadata: Value,
}

impl SearchResult {
    pub fn from_hotel(hotel: &Hotel) -> Self {
        let themes = hotel
            .detail("themes")
            .and_then(Value::as_array)
            .map(|themes| themes.iter().map(display_value).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();

        Self {
            id: hotel.id.to_string(),
            title: format!("{} ({})", detail_text(hotel, "name"), detail_text(hotel, "country")),
            snippet: format!(
                "Region: {}. Themes: {}. Rating: {}",
                detail_text(hotel, "region"),
                themes,
                detail_text(hotel, "rating")
            ),
            url: hotel.detail("bookingUrl").cloned().unwrap_or(Value::Null),
            metadata: json!({ "type": "hotel" }),
        }
    }
}

fn detail_text(hotel: &Hotel, key: &str) -> String {
    hotel.detail(key).map(display_value).unwrap_or_default()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn ping(input: PingInput) -> McpResult<ToolResult> {
    Ok(ToolResult::structured(json!({ "ok": true, "echo": input.message }))
        .with_text(format!("ok: {}", input.message)))
}

pub async fn list_hotels(session: &MapSession, query: HotelQuery) -> McpResult<ToolResult> {
    let list = session.api().list_hotels(&query).await?;
    Ok(ToolResult::structured(serde_json::to_value(list)?))
}

pub async fn get_hotel(session: &MapSession, input: GetHotelInput) -> McpResult<ToolResult> {
    let hotel = session.api().get_hotel(&input.hotel_id).await?;
    Ok(ToolResult::structured(hotel))
}

pub async fn search(session: &MapSession, input: SearchInput) -> McpResult<ToolResult> {
    let query = HotelQuery::text(input.query).with_limit(input.limit);
    let list = session.api().list_hotels(&query).await?;
    let results: Vec<SearchResult> = list.hotels.iter().map(SearchResult::from_hotel).collect();
    Ok(ToolResult::structured(json!({ "results": results })))
}

pub async fn fetch(session: &MapSession, input: FetchInput) -> McpResult<ToolResult> {
    let hotel = session.api().get_hotel(&input.id).await?;

    let mut body = Map::new();
    body.insert("ok".to_string(), Value::Bool(true));
    if let Value::Object(fields) = &hotel {
        body.extend(fields.clone());
    }
    let text = serde_json::to_string_pretty(&Value::Object(body))?;

    Ok(ToolResult::structured(hotel).with_text(text))
}
