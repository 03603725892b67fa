//! Tool providers and the registry
//!
//! ## Providers
//!
//! One provider per resource domain, each holding its cloud client:
//! - `compute`: list_instances, get_instance, start_instance, stop_instance
//! - `network`: list_vcns, list_subnets, list_security_lists
//! - `storage`: list_buckets, get_bucket, list_objects, list_block_volumes,
//!   get_bucket_sizes_by_user
//! - `identity`: list_compartments, list_users, list_groups, list_policies

pub mod compute;
pub mod identity;
pub mod network;
pub mod storage;

mod registry;
mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use compute::ComputeToolProvider;
pub use identity::IdentityToolProvider;
pub use network::NetworkToolProvider;
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use schema::JsonSchemaToolConverter;
pub use storage::StorageToolProvider;

use std::sync::Arc;

use ociops_application::config::ExecutionParams;
use ociops_application::ports::cloud::CloudClients;
use ociops_domain::tool::{ProviderError, ToolCall};

/// Registry builder with every domain provider registered against `clients`.
pub fn default_registry(clients: &CloudClients, params: &ExecutionParams) -> ToolRegistryBuilder {
    ToolRegistry::builder()
        .register(ComputeToolProvider::new(Arc::clone(&clients.compute)))
        .register(NetworkToolProvider::new(Arc::clone(&clients.network)))
        .register(StorageToolProvider::new(Arc::clone(&clients.storage), params))
        .register(IdentityToolProvider::new(Arc::clone(&clients.identity)))
}

/// Required string argument; schema validation has already run.
pub(crate) fn required<'a>(call: &'a ToolCall, key: &str) -> Result<&'a str, ProviderError> {
    call.require_string(key).map_err(ProviderError::InvalidArgument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ociops_application::ports::tool_executor::ToolExecutorPort;
    use testing::{FakeCompute, FakeIdentity, FakeNetwork, FakeStorage};

    fn clients() -> CloudClients {
        CloudClients {
            compute: Arc::new(FakeCompute::new(vec![])),
            network: Arc::new(FakeNetwork::default()),
            storage: Arc::new(FakeStorage::default()),
            identity: Arc::new(FakeIdentity),
        }
    }

    #[test]
    fn test_default_registry_has_every_tool() {
        let registry = default_registry(&clients(), &ExecutionParams::default())
            .build()
            .unwrap();

        assert_eq!(registry.tool_spec().len(), 16);
        assert_eq!(
            registry.provider_ids(),
            vec!["compute", "network", "storage", "identity"]
        );

        let mutating: Vec<&str> = registry
            .tool_spec()
            .mutating_tools()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(mutating, vec!["start_instance", "stop_instance"]);
    }

    #[tokio::test]
    async fn test_bucket_sizes_through_registry_on_spawned_task() {
        let registry = Arc::new(
            default_registry(&clients(), &ExecutionParams::default())
                .build()
                .unwrap(),
        );
        let call = ToolCall::from_input(
            "get_bucket_sizes_by_user",
            serde_json::json!({ "compartment_id": "ocid1.compartment.oc1..c" }),
        );

        let result = tokio::spawn(async move { registry.execute(&call).await })
            .await
            .unwrap();

        assert!(!result.is_error(), "{}", result.text());
        let report: serde_json::Value = serde_json::from_str(&result.text()).unwrap();
        assert_eq!(report["total_buckets"], 2);
        assert_eq!(report["by_user"][0]["created_by"], "ocid1.user.oc1..bob");
    }
}
