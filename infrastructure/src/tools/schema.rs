//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the tool
//! descriptors the Messages API expects.

use ociops_application::ports::tool_schema::ToolSchemaPort;
use ociops_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Produces `{name, description, input_schema}` per tool.
///
/// The mutating flag is not part of the schema; the reasoning runtime
/// learns it from the system instruction text.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ociops_domain::tool::entities::{Mutability, ParamType, ToolParameter};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("list_instances", "List instances", Mutability::ReadOnly)
            .with_parameter(ToolParameter::new("compartment_id", "Compartment OCID", true))
            .with_parameter(
                ToolParameter::new("limit", "Max results", false).with_type(ParamType::Integer),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "list_instances");
        assert_eq!(schema["description"], "List instances");
        assert_eq!(schema["input_schema"]["type"], "object");

        let compartment = &schema["input_schema"]["properties"]["compartment_id"];
        assert_eq!(compartment["type"], "string");
        assert_eq!(compartment["description"], "Compartment OCID");
        assert_eq!(schema["input_schema"]["properties"]["limit"]["type"], "integer");

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "compartment_id");
        assert!(schema.get("mutability").is_none());
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let converter = JsonSchemaToolConverter;
        let spec = ToolSpec::new()
            .try_register(ToolDefinition::new("stop_instance", "Stop", Mutability::Mutating))
            .unwrap()
            .try_register(ToolDefinition::new("list_vcns", "VCNs", Mutability::ReadOnly))
            .unwrap();

        let tools = converter.all_tools_schema(&spec);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "list_vcns");
        assert_eq!(tools[1]["name"], "stop_instance");
    }
}
