//! Tool input validation
//!
//! Every tool's input schema is compiled once at startup. Arguments are
//! checked against it before they are deserialized or forwarded anywhere.

use std::collections::HashMap;

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{McpError, McpResult};
use crate::tools::ToolDefinition;

/// Compiled input schemas, by tool name
pub struct SchemaRegistry {
    validators: HashMap<String, Validator>,
}

impl SchemaRegistry {
    /// Compile the schema of every definition
    pub fn compile(definitions: &[ToolDefinition]) -> McpResult<Self> {
        let mut validators = HashMap::with_capacity(definitions.len());
        for def in definitions {
            let validator = jsonschema::validator_for(&def.input_schema).map_err(|e| McpError::Schema {
                tool: def.name.clone(),
                message: e.to_string(),
            })?;
            validators.insert(def.name.clone(), validator);
        }
        Ok(Self { validators })
    }

    pub fn contains(&self, tool: &str) -> bool {
        self.validators.contains_key(tool)
    }

    /// Check arguments for a tool
    ///
    /// Unknown tools are reported as [`McpError::ToolNotFound`]; schema
    /// violations as [`McpError::InvalidArguments`] listing every problem.
    pub fn validate(&self, tool: &str, arguments: &Value) -> McpResult<()> {
        let validator = self
            .validators
            .get(tool)
            .ok_or_else(|| McpError::ToolNotFound(tool.to_string()))?;

        let errors: Vec<String> = validator
            .iter_errors(arguments)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{}: {}", path, e)
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(McpError::InvalidArguments {
                tool: tool.to_string(),
                errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::get_tool_definitions;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::compile(&get_tool_definitions()).unwrap()
    }

    #[test]
    fn test_all_tool_schemas_compile() {
        let registry = registry();
        for def in get_tool_definitions() {
            assert!(registry.contains(&def.name), "{} missing", def.name);
        }
    }

    #[test]
    fn test_list_limit_bounds() {
        let registry = registry();
        assert!(registry.validate("list_hotels", &json!({})).is_ok());
        assert!(registry.validate("list_hotels", &json!({ "limit": 200 })).is_ok());
        assert!(registry.validate("list_hotels", &json!({ "limit": 0 })).is_err());
        assert!(registry.validate("list_hotels", &json!({ "limit": 201 })).is_err());
        assert!(registry.validate("list_hotels", &json!({ "limit": 2.5 })).is_err());
    }

    #[test]
    fn test_quote_requires_adult() {
        let registry = registry();
        let args = json!({
            "hotel_id": "cm-kani",
            "check_in": "2025-03-01",
            "check_out": "2025-03-06",
            "adults": 0
        });
        match registry.validate("get_quote", &args) {
            Err(McpError::InvalidArguments { tool, errors }) => {
                assert_eq!(tool, "get_quote");
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("/adults"));
            }
            other => panic!("expected invalid arguments, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tool() {
        assert!(matches!(
            registry().validate("teleport", &json!({})),
            Err(McpError::ToolNotFound(_))
        ));
    }
}
