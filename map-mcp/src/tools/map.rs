//! Map tools: search onto the map and drive the shared view state
//!
//! Every tool that changes the view answers with the resulting snapshot, so
//! the agent sees what the user sees.

use map_client::{HotelQuery, MapSearch, MapSession};
use map_core::{HotelId, SelectionSource, ViewportRect};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::catalog::list_schema;
use super::{ToolDefinition, ToolResult};
use crate::error::{McpError, McpResult};

/// Result limit used by demo presets
const DEMO_LIMIT: u32 = 100;

/// map_search tool definition
pub fn map_search_tool() -> ToolDefinition {
    ToolDefinition::new(
        "map_search",
        "Map search",
        "Returns resorts and bounds to render on the in-chat map UI.",
        list_schema(),
    )
    .with_widget()
}

/// ui_demo_load tool definition
pub fn ui_demo_load_tool() -> ToolDefinition {
    ToolDefinition::new(
        "ui_demo_load",
        "UI demo load",
        "Loads a demo dataset onto the map UI (default: beach).",
        json!({
            "type": "object",
            "properties": {
                "preset": {
                    "type": "string",
                    "enum": ["beach", "ski", "maldives", "alps"],
                    "default": "beach"
                }
            }
        }),
    )
    .with_widget()
}

/// map_set_viewport tool definition
pub fn set_viewport_tool() -> ToolDefinition {
    ToolDefinition::new(
        "map_set_viewport",
        "Set map viewport",
        "Sets the visible map rectangle (X = longitude, Y = latitude), or clears it with {\"clear\": true} so every hotel is visible.",
        json!({
            "type": "object",
            "properties": {
                "minX": { "type": "number" },
                "maxX": { "type": "number" },
                "minY": { "type": "number" },
                "maxY": { "type": "number" },
                "clear": { "type": "boolean" }
            },
            "anyOf": [
                { "required": ["minX", "maxX", "minY", "maxY"] },
                { "required": ["clear"], "properties": { "clear": { "const": true } } }
            ]
        }),
    )
}

/// map_select_hotel tool definition
pub fn select_hotel_tool() -> ToolDefinition {
    ToolDefinition::new(
        "map_select_hotel",
        "Select hotel",
        "Selects a hotel from the loaded list, opens its detail view and flies the map to it.",
        json!({
            "type": "object",
            "required": ["hotel_id"],
            "properties": {
                "hotel_id": { "type": "string" },
                "source": {
                    "type": "string",
                    "enum": ["list", "marker"],
                    "default": "list"
                }
            }
        }),
    )
}

/// map_close_detail tool definition
pub fn close_detail_tool() -> ToolDefinition {
    ToolDefinition::new(
        "map_close_detail",
        "Close hotel detail",
        "Closes the detail view. The selected hotel stays highlighted.",
        json!({ "type": "object", "properties": {} }),
    )
}

/// map_view_state tool definition
pub fn view_state_tool() -> ToolDefinition {
    ToolDefinition::new(
        "map_view_state",
        "Map view state",
        "Returns the current viewport, visible hotels, selection and fly-to target.",
        json!({ "type": "object", "properties": {} }),
    )
}

/// Input for ui_demo_load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoLoadInput {
    #[serde(default)]
    pub preset: DemoPreset,
}

/// Canned searches for the demo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoPreset {
    #[default]
    Beach,
    Ski,
    Maldives,
    Alps,
}

impl DemoPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoPreset::Beach => "beach",
            DemoPreset::Ski => "ski",
            DemoPreset::Maldives => "maldives",
            DemoPreset::Alps => "alps",
        }
    }
}

/// Input for map_set_viewport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetViewportInput {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    #[serde(default)]
    pub clear: bool,
}

impl SetViewportInput {
    /// `None` clears the viewport
    pub fn rect(&self) -> McpResult<Option<ViewportRect>> {
        if self.clear {
            return Ok(None);
        }
        match (self.min_x, self.max_x, self.min_y, self.max_y) {
            (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) => {
                Ok(Some(ViewportRect::new(min_x, max_x, min_y, max_y)))
            }
            _ => Err(McpError::InvalidParams(
                "minX, maxX, minY and maxY are required unless clear is true".to_string(),
            )),
        }
    }
}

/// Input for map_select_hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectHotelInput {
    pub hotel_id: String,
    #[serde(default)]
    pub source: SelectionSource,
}

fn search_payload(search: &MapSearch) -> McpResult<Value> {
    Ok(json!({
        "hotels": search.hotels,
        "bounds": serde_json::to_value(search.bounds)?,
        "count": search.count,
    }))
}

pub async fn map_search(session: &MapSession, query: HotelQuery) -> McpResult<ToolResult> {
    let search = session.search(&query).await?;
    Ok(ToolResult::structured(search_payload(&search)?))
}

pub async fn ui_demo_load(session: &MapSession, input: DemoLoadInput) -> McpResult<ToolResult> {
    let preset = input.preset.as_str();
    let query = HotelQuery::text(preset).with_limit(DEMO_LIMIT);
    let search = session.search(&query).await?;

    let mut payload = search_payload(&search)?;
    payload["preset"] = Value::from(preset);
    Ok(ToolResult::structured(payload))
}

pub async fn set_viewport(session: &MapSession, input: SetViewportInput) -> McpResult<ToolResult> {
    let rect = input.rect()?;
    session.view().lock().await.update_viewport(rect);
    view_state(session).await
}

pub async fn select_hotel(session: &MapSession, input: SelectHotelInput) -> McpResult<ToolResult> {
    let id = HotelId::new(input.hotel_id);
    session
        .view()
        .lock()
        .await
        .select_hotel_by_id(input.source, &id)?;
    view_state(session).await
}

pub async fn close_detail(session: &MapSession) -> McpResult<ToolResult> {
    session.view().lock().await.close_detail();
    view_state(session).await
}

pub async fn view_state(session: &MapSession) -> McpResult<ToolResult> {
    let snapshot = session.view().lock().await.snapshot();
    let summary = format!(
        "{} of {} hotels visible",
        snapshot.visible_count, snapshot.list.count
    );
    Ok(ToolResult::structured(serde_json::to_value(snapshot)?).with_text(summary))
}
