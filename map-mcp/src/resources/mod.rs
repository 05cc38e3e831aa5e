//! Resources agents and hosts can read
//!
//! - `map://view/state`: the current view snapshot as JSON
//! - `ui://widget/resort-map.html`: the map widget, when one is configured

use map_client::MapSession;
use serde::{Deserialize, Serialize};

use crate::error::McpResult;
use crate::{VIEW_STATE_URI, WIDGET_MIME_TYPE, WIDGET_URI};

/// Resource definition for resources/list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub uri: String,

    pub name: String,

    pub description: String,

    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// One entry of a resources/read answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,

    #[serde(rename = "mimeType")]
    pub mime_type: String,

    pub text: String,
}

/// Get all resource definitions
pub fn get_resource_definitions(with_widget: bool) -> Vec<ResourceDefinition> {
    let mut resources = vec![ResourceDefinition {
        uri: VIEW_STATE_URI.to_string(),
        name: "map-view-state".to_string(),
        description: "Viewport, visible hotels, selection and fly-to target of the map view".to_string(),
        mime_type: "application/json".to_string(),
    }];

    if with_widget {
        resources.push(ResourceDefinition {
            uri: WIDGET_URI.to_string(),
            name: "resort-map".to_string(),
            description: "Interactive resort map widget".to_string(),
            mime_type: WIDGET_MIME_TYPE.to_string(),
        });
    }

    resources
}

/// Snapshot of the session's view
pub async fn read_view_state(session: &MapSession) -> McpResult<ResourceContent> {
    let snapshot = session.view().lock().await.snapshot();
    Ok(ResourceContent {
        uri: VIEW_STATE_URI.to_string(),
        mime_type: "application/json".to_string(),
        text: serde_json::to_string_pretty(&snapshot)?,
    })
}

/// The widget document
pub fn read_widget(html: &str) -> ResourceContent {
    ResourceContent {
        uri: WIDGET_URI.to_string(),
        mime_type: WIDGET_MIME_TYPE.to_string(),
        text: html.to_string(),
    }
}
