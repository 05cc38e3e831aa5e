//! Booking tools

use chrono::NaiveDate;
use map_client::{MapSession, QuoteRequest};
use serde_json::json;

use super::{ToolDefinition, ToolResult};
use crate::error::{McpError, McpResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// get_quote tool definition
pub fn get_quote_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_quote",
        "Get a quote",
        "Returns a mock quote from the REST API.",
        json!({
            "type": "object",
            "required": ["hotel_id", "check_in", "check_out", "adults"],
            "properties": {
                "hotel_id": { "type": "string" },
                "check_in": {
                    "type": "string",
                    "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
                    "description": "YYYY-MM-DD"
                },
                "check_out": {
                    "type": "string",
                    "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
                    "description": "YYYY-MM-DD"
                },
                "adults": { "type": "integer", "minimum": 1 },
                "children": { "type": "integer", "minimum": 0, "default": 0 }
            }
        }),
    )
}

/// Reject calendar dates the pattern lets through, like `2025-02-30`
fn check_date(field: &str, value: &str) -> McpResult<()> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| McpError::InvalidArguments {
            tool: "get_quote".to_string(),
            errors: vec![format!("/{}: {} is not a calendar date", field, value)],
        })
}

pub async fn get_quote(session: &MapSession, request: QuoteRequest) -> McpResult<ToolResult> {
    check_date("check_in", &request.check_in)?;
    check_date("check_out", &request.check_out)?;

    let quote = session.api().quote(&request).await?;
    Ok(ToolResult::structured(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_date() {
        assert!(check_date("check_in", "2025-03-01").is_ok());
        assert!(check_date("check_in", "2024-02-29").is_ok());

        let err = check_date("check_out", "2025-02-30").unwrap_err();
        assert!(err.is_tool_error());
        assert_eq!(
            err.to_string(),
            "Invalid arguments for get_quote: /check_out: 2025-02-30 is not a calendar date"
        );
    }
}
