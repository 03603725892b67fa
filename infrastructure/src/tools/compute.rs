//! Compute tools: list_instances, get_instance, start_instance, stop_instance

use std::sync::Arc;

use async_trait::async_trait;
use ociops_application::ports::cloud::ComputeApi;
use ociops_domain::cloud::InstanceAction;
use ociops_domain::tool::{
    Mutability, ParamType, ProviderError, ToolCall, ToolContent, ToolDefinition, ToolParameter,
    ToolProvider, json_content,
};

use super::required;

/// Tool name constants
pub const LIST_INSTANCES: &str = "list_instances";
pub const GET_INSTANCE: &str = "get_instance";
pub const START_INSTANCE: &str = "start_instance";
pub const STOP_INSTANCE: &str = "stop_instance";

/// Page size when the caller gives no limit
pub const DEFAULT_INSTANCE_LIMIT: i64 = 20;

pub fn list_instances_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_INSTANCES,
        "List compute instances in a compartment",
        Mutability::ReadOnly,
    )
    .with_parameter(ToolParameter::new("compartment_id", "OCID of the compartment", true))
    .with_parameter(
        ToolParameter::new("limit", "Maximum number of instances to return (default 20)", false)
            .with_type(ParamType::Integer),
    )
}

pub fn get_instance_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_INSTANCE,
        "Get details of a compute instance",
        Mutability::ReadOnly,
    )
    .with_parameter(ToolParameter::new("instance_id", "OCID of the instance", true))
}

pub fn start_instance_definition() -> ToolDefinition {
    ToolDefinition::new(
        START_INSTANCE,
        "Start a stopped compute instance",
        Mutability::Mutating,
    )
    .with_parameter(ToolParameter::new("instance_id", "OCID of the instance to start", true))
}

pub fn stop_instance_definition() -> ToolDefinition {
    ToolDefinition::new(
        STOP_INSTANCE,
        "Gracefully stop a running compute instance",
        Mutability::Mutating,
    )
    .with_parameter(ToolParameter::new("instance_id", "OCID of the instance to stop", true))
}

/// Compute instance tools
pub struct ComputeToolProvider {
    compute: Arc<dyn ComputeApi>,
}

impl ComputeToolProvider {
    pub fn new(compute: Arc<dyn ComputeApi>) -> Self {
        Self { compute }
    }

    async fn list_instances(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        let compartment_id = required(call, "compartment_id")?;
        let limit = call.get_i64("limit").unwrap_or(DEFAULT_INSTANCE_LIMIT);
        let limit = u32::try_from(limit)
            .ok()
            .filter(|l| *l > 0)
            .ok_or_else(|| {
                ProviderError::InvalidArgument(format!("limit must be a positive integer, got {limit}"))
            })?;

        let instances = self.compute.list_instances(compartment_id, limit).await?;
        json_content(&instances)
    }

    async fn get_instance(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        let instance = self
            .compute
            .get_instance(required(call, "instance_id")?)
            .await?;
        json_content(&instance)
    }

    async fn instance_action(
        &self,
        call: &ToolCall,
        action: InstanceAction,
    ) -> Result<Vec<ToolContent>, ProviderError> {
        let instance_id = required(call, "instance_id")?;
        let instance = self.compute.instance_action(instance_id, action).await?;
        Ok(vec![ToolContent::text(format!(
            "{action} action sent to instance {instance_id}. New state: {}",
            instance.lifecycle_state
        ))])
    }
}

#[async_trait]
impl ToolProvider for ComputeToolProvider {
    fn id(&self) -> &str {
        "compute"
    }

    fn display_name(&self) -> &str {
        "Compute"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            list_instances_definition(),
            get_instance_definition(),
            start_instance_definition(),
            stop_instance_definition(),
        ]
    }

    async fn execute(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        match call.tool_name.as_str() {
            LIST_INSTANCES => self.list_instances(call).await,
            GET_INSTANCE => self.get_instance(call).await,
            START_INSTANCE => self.instance_action(call, InstanceAction::Start).await,
            STOP_INSTANCE => self.instance_action(call, InstanceAction::SoftStop).await,
            _ => Err(ProviderError::ToolNotFound(call.tool_name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{FakeCompute, instance};

    fn provider() -> (ComputeToolProvider, Arc<FakeCompute>) {
        let fake = Arc::new(FakeCompute::new(vec![
            instance("ocid1.instance.oc1..a", "web-1", "RUNNING"),
            instance("ocid1.instance.oc1..b", "web-2", "STOPPED"),
        ]));
        (ComputeToolProvider::new(fake.clone()), fake)
    }

    #[tokio::test]
    async fn test_start_text_names_action_and_state() {
        let (provider, fake) = provider();
        let call = ToolCall::new(START_INSTANCE).with_arg("instance_id", "ocid1.instance.oc1..b");

        let content = provider.execute(&call).await.unwrap();

        let text = content[0].as_text();
        assert!(text.contains("START"));
        assert!(text.contains("ocid1.instance.oc1..b"));
        assert!(text.contains("STARTING"));
        assert_eq!(
            fake.actions.lock().unwrap().as_slice(),
            &[("ocid1.instance.oc1..b".to_string(), InstanceAction::Start)]
        );
    }

    #[tokio::test]
    async fn test_stop_uses_softstop() {
        let (provider, _) = provider();
        let call = ToolCall::new(STOP_INSTANCE).with_arg("instance_id", "ocid1.instance.oc1..a");

        let content = provider.execute(&call).await.unwrap();

        assert_eq!(
            content[0].as_text(),
            "SOFTSTOP action sent to instance ocid1.instance.oc1..a. New state: STOPPING"
        );
    }

    #[tokio::test]
    async fn test_list_instances_payload_fields() {
        let (provider, fake) = provider();
        let call = ToolCall::new(LIST_INSTANCES).with_arg("compartment_id", "ocid1.compartment.oc1..c");

        let content = provider.execute(&call).await.unwrap();

        let payload: serde_json::Value = serde_json::from_str(content[0].as_text()).unwrap();
        let first = &payload.as_array().unwrap()[0];
        for field in [
            "id",
            "display_name",
            "lifecycle_state",
            "shape",
            "compartment_id",
            "region",
            "availability_domain",
            "time_created",
        ] {
            assert!(first.get(field).is_some(), "missing {field}");
        }
        assert_eq!(*fake.last_limit.lock().unwrap(), Some(20));
    }

    #[tokio::test]
    async fn test_list_instances_rejects_negative_limit() {
        let (provider, _) = provider();
        let call = ToolCall::new(LIST_INSTANCES)
            .with_arg("compartment_id", "c")
            .with_arg("limit", -1);

        let err = provider.execute(&call).await.unwrap_err();
        assert_eq!(err.code(), "InvalidArgument");
    }

    #[test]
    fn test_only_actions_are_mutating() {
        let (provider, _) = provider();
        let mutating: Vec<String> = provider
            .tools()
            .into_iter()
            .filter(|t| t.is_mutating())
            .map(|t| t.name)
            .collect();
        assert_eq!(mutating, vec![START_INSTANCE, STOP_INSTANCE]);
    }
}
