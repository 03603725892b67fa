//! Tool domain traits
//!
//! Contains the pure validation step of the dispatch path.
//! The async ToolExecutorPort is defined in the application layer (ports).

use std::collections::HashSet;

use super::entities::{ToolCall, ToolDefinition};
use crate::core::error::{FieldIssue, SchemaValidationError};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> Result<(), SchemaValidationError>;
}

/// Strict schema validator.
///
/// Collects every issue instead of stopping at the first one, and never
/// coerces: `"20"` is not an integer. An optional field sent as `null`
/// is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator;

impl ToolValidator for SchemaValidator {
    fn validate(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> Result<(), SchemaValidationError> {
        let mut issues = Vec::new();

        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                None | Some(serde_json::Value::Null) => {
                    if param.required {
                        issues.push(FieldIssue::Missing {
                            field: param.name.clone(),
                        });
                    }
                }
                Some(value) if !param.param_type.accepts(value) => {
                    issues.push(FieldIssue::TypeMismatch {
                        field: param.name.clone(),
                        expected: param.param_type.to_string(),
                        found: json_type_name(value).to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let declared: HashSet<&str> = definition
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        let mut unknown: Vec<&String> = call
            .arguments
            .keys()
            .filter(|k| !declared.contains(k.as_str()))
            .collect();
        // HashMap order is not stable
        unknown.sort();
        issues.extend(unknown.into_iter().map(|field| FieldIssue::Unknown {
            field: field.clone(),
        }));

        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError {
                tool: definition.name.clone(),
                issues,
            })
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_f64() => "number",
        serde_json::Value::Number(_) => "integer",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
