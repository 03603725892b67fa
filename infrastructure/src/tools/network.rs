//! Network tools: list_vcns, list_subnets, list_security_lists

use std::sync::Arc;

use async_trait::async_trait;
use ociops_application::ports::cloud::NetworkApi;
use ociops_domain::cloud::SecurityListSummary;
use ociops_domain::tool::{
    Mutability, ProviderError, ToolCall, ToolContent, ToolDefinition, ToolParameter, ToolProvider,
    json_content,
};

use super::required;

pub const LIST_VCNS: &str = "list_vcns";
pub const LIST_SUBNETS: &str = "list_subnets";
pub const LIST_SECURITY_LISTS: &str = "list_security_lists";

fn compartment_param() -> ToolParameter {
    ToolParameter::new("compartment_id", "OCID of the compartment", true)
}

fn vcn_filter_param() -> ToolParameter {
    ToolParameter::new("vcn_id", "Only return entries of this VCN", false)
}

pub fn list_vcns_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_VCNS,
        "List virtual cloud networks in a compartment",
        Mutability::ReadOnly,
    )
    .with_parameter(compartment_param())
}

pub fn list_subnets_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_SUBNETS,
        "List subnets in a compartment, optionally for one VCN",
        Mutability::ReadOnly,
    )
    .with_parameter(compartment_param())
    .with_parameter(vcn_filter_param())
}

pub fn list_security_lists_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_SECURITY_LISTS,
        "List security lists with their ingress and egress rule counts",
        Mutability::ReadOnly,
    )
    .with_parameter(compartment_param())
    .with_parameter(vcn_filter_param())
}

/// Virtual network tools
pub struct NetworkToolProvider {
    network: Arc<dyn NetworkApi>,
}

impl NetworkToolProvider {
    pub fn new(network: Arc<dyn NetworkApi>) -> Self {
        Self { network }
    }
}

#[async_trait]
impl ToolProvider for NetworkToolProvider {
    fn id(&self) -> &str {
        "network"
    }

    fn display_name(&self) -> &str {
        "Networking"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            list_vcns_definition(),
            list_subnets_definition(),
            list_security_lists_definition(),
        ]
    }

    async fn execute(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        let compartment_id = required(call, "compartment_id")?;
        let vcn_id = call.get_string("vcn_id");

        match call.tool_name.as_str() {
            LIST_VCNS => json_content(&self.network.list_vcns(compartment_id).await?),
            LIST_SUBNETS => json_content(&self.network.list_subnets(compartment_id, vcn_id).await?),
            LIST_SECURITY_LISTS => {
                let lists = self
                    .network
                    .list_security_lists(compartment_id, vcn_id)
                    .await?;
                let summaries: Vec<SecurityListSummary> =
                    lists.iter().map(SecurityListSummary::from).collect();
                json_content(&summaries)
            }
            _ => Err(ProviderError::ToolNotFound(call.tool_name.clone())),
        }
    }
}
