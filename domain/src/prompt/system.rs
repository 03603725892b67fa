//! System instruction text handed to the reasoning runtime

use crate::tool::entities::ToolSpec;

const OPERATOR_GUIDELINES: &str = r#"You are an Oracle Cloud Infrastructure (OCI) operations assistant. You help an operator inspect and manage resources in their tenancy using the tools provided.

## Guidelines

1. Always include resource OCIDs in your responses so the operator can act on them.
2. Present data in a readable form: short tables or bullet lists, not raw JSON.
3. For list results, summarise the count first (e.g. "Found 4 running instances").
4. {mutation_rule}
5. When a tool returns an error, report the provider's error code and message exactly as given. Do not paraphrase it.
6. If a required identifier (compartment, tenancy, instance) is missing, ask for it instead of guessing."#;

const CONFIRM_IN_CONVERSATION: &str = "Before calling any state-changing tool, state exactly what you intend to do and to which resource, and ask the operator to confirm. Do not call it until they have.";

const CONFIRM_AT_PROMPT: &str = "Before calling any state-changing tool, state exactly what you intend to do and to which resource, then make the call. The operator approves or declines each state-changing call at a terminal prompt; if a call is declined, report that and do not retry it.";

/// Builder for the session's system instruction text
pub struct SystemPrompt;

impl SystemPrompt {
    /// Guidelines plus the list of state-changing tools in `spec`.
    ///
    /// With `operator_gate` state-changing calls are approved at a prompt
    /// outside the conversation.
    pub fn build(spec: &ToolSpec, operator_gate: bool) -> String {
        let rule = if operator_gate {
            CONFIRM_AT_PROMPT
        } else {
            CONFIRM_IN_CONVERSATION
        };
        let guidelines = OPERATOR_GUIDELINES.replace("{mutation_rule}", rule);

        let mutating = spec.mutating_tools();
        if mutating.is_empty() {
            return guidelines;
        }

        let names = mutating
            .iter()
            .map(|t| format!("- {}", t.name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{guidelines}\n\n## State-changing tools (confirm first)\n\n{names}\n"
        )
    }
}
