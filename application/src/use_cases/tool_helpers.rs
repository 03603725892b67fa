//! Shared helpers for tool use cases.

use ociops_domain::tool::entities::ToolCall;

/// Argument keys that identify the target resource, most specific first.
const TARGET_KEYS: [&str; 6] = [
    "instance_id",
    "bucket_name",
    "vcn_id",
    "compartment_id",
    "tenancy_id",
    "namespace",
];

/// Extract a short preview string from tool call arguments.
///
/// Looks for the resource identifier keys first, then falls back to the
/// string value under the alphabetically first key.
pub fn tool_args_preview(call: &ToolCall) -> String {
    for key in TARGET_KEYS {
        if let Some(serde_json::Value::String(s)) = call.arguments.get(key) {
            return truncate_preview(s, 60);
        }
    }

    let mut keys: Vec<&String> = call.arguments.keys().collect();
    keys.sort();
    keys.into_iter()
        .find_map(|k| call.arguments[k].as_str())
        .map(|s| truncate_preview(s, 60))
        .unwrap_or_default()
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
