//! Identity tools: compartments, users, groups, policies

use std::sync::Arc;

use async_trait::async_trait;
use ociops_application::ports::cloud::IdentityApi;
use ociops_domain::tool::{
    Mutability, ProviderError, ToolCall, ToolContent, ToolDefinition, ToolParameter, ToolProvider,
    json_content,
};

use super::required;

pub const LIST_COMPARTMENTS: &str = "list_compartments";
pub const LIST_USERS: &str = "list_users";
pub const LIST_GROUPS: &str = "list_groups";
pub const LIST_POLICIES: &str = "list_policies";

fn tenancy_scoped(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition::new(name, description, Mutability::ReadOnly)
        .with_parameter(ToolParameter::new("tenancy_id", "OCID of the tenancy", true))
}

pub fn list_compartments_definition() -> ToolDefinition {
    tenancy_scoped(
        LIST_COMPARTMENTS,
        "List every accessible compartment in the tenancy, nested ones included",
    )
}

pub fn list_users_definition() -> ToolDefinition {
    tenancy_scoped(LIST_USERS, "List IAM users in the tenancy")
}

pub fn list_groups_definition() -> ToolDefinition {
    tenancy_scoped(LIST_GROUPS, "List IAM groups in the tenancy")
}

pub fn list_policies_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_POLICIES,
        "List IAM policies attached to a compartment, statements included",
        Mutability::ReadOnly,
    )
    .with_parameter(ToolParameter::new("compartment_id", "OCID of the compartment", true))
}

/// Identity and access tools
pub struct IdentityToolProvider {
    identity: Arc<dyn IdentityApi>,
}

impl IdentityToolProvider {
    pub fn new(identity: Arc<dyn IdentityApi>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl ToolProvider for IdentityToolProvider {
    fn id(&self) -> &str {
        "identity"
    }

    fn display_name(&self) -> &str {
        "Identity"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            list_compartments_definition(),
            list_users_definition(),
            list_groups_definition(),
            list_policies_definition(),
        ]
    }

    async fn execute(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        match call.tool_name.as_str() {
            LIST_COMPARTMENTS => {
                json_content(&self.identity.list_compartments(required(call, "tenancy_id")?).await?)
            }
            LIST_USERS => json_content(&self.identity.list_users(required(call, "tenancy_id")?).await?),
            LIST_GROUPS => {
                json_content(&self.identity.list_groups(required(call, "tenancy_id")?).await?)
            }
            LIST_POLICIES => {
                json_content(&self.identity.list_policies(required(call, "compartment_id")?).await?)
            }
            _ => Err(ProviderError::ToolNotFound(call.tool_name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::FakeIdentity;

    #[tokio::test]
    async fn test_policy_statements_in_payload() {
        let provider = IdentityToolProvider::new(Arc::new(FakeIdentity));
        let call = ToolCall::new(LIST_POLICIES).with_arg("compartment_id", "c");

        let content = provider.execute(&call).await.unwrap();

        let payload: serde_json::Value = serde_json::from_str(content[0].as_text()).unwrap();
        assert_eq!(
            payload[0]["statements"][0],
            "Allow group Admins to manage all-resources in tenancy"
        );
    }

    #[tokio::test]
    async fn test_user_mfa_flag() {
        let provider = IdentityToolProvider::new(Arc::new(FakeIdentity));
        let call = ToolCall::new(LIST_USERS).with_arg("tenancy_id", "t");

        let content = provider.execute(&call).await.unwrap();

        let payload: serde_json::Value = serde_json::from_str(content[0].as_text()).unwrap();
        assert_eq!(payload[0]["is_mfa_activated"], true);
        assert_eq!(payload[0]["email"], "ops@example.com");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let provider = IdentityToolProvider::new(Arc::new(FakeIdentity));
        let err = provider.execute(&ToolCall::new("delete_user")).await.unwrap_err();
        assert_eq!(err.code(), "NotFound");
    }
}
