//! Storage tools: buckets, objects, block volumes and the usage report

use std::sync::Arc;

use async_trait::async_trait;
use ociops_application::config::ExecutionParams;
use ociops_application::ports::cloud::StorageApi;
use ociops_application::use_cases::bucket_usage::BucketUsageUseCase;
use ociops_application::use_cases::pagination::collect_pages;
use ociops_domain::tool::{
    Mutability, ProviderError, ToolCall, ToolContent, ToolDefinition, ToolParameter, ToolProvider,
    json_content,
};

use super::required;

pub const LIST_BUCKETS: &str = "list_buckets";
pub const GET_BUCKET: &str = "get_bucket";
pub const LIST_OBJECTS: &str = "list_objects";
pub const LIST_BLOCK_VOLUMES: &str = "list_block_volumes";
pub const GET_BUCKET_SIZES_BY_USER: &str = "get_bucket_sizes_by_user";

fn compartment_param() -> ToolParameter {
    ToolParameter::new("compartment_id", "OCID of the compartment", true)
}

fn bucket_params(definition: ToolDefinition) -> ToolDefinition {
    definition
        .with_parameter(ToolParameter::new("bucket_name", "Name of the bucket", true))
        .with_parameter(ToolParameter::new(
            "namespace",
            "Object storage namespace (defaults to the tenancy namespace)",
            false,
        ))
}

pub fn list_buckets_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_BUCKETS,
        "List object storage buckets in a compartment",
        Mutability::ReadOnly,
    )
    .with_parameter(compartment_param())
}

pub fn get_bucket_definition() -> ToolDefinition {
    bucket_params(ToolDefinition::new(
        GET_BUCKET,
        "Get details of an object storage bucket",
        Mutability::ReadOnly,
    ))
}

pub fn list_objects_definition() -> ToolDefinition {
    bucket_params(ToolDefinition::new(
        LIST_OBJECTS,
        "List objects in a bucket",
        Mutability::ReadOnly,
    ))
}

pub fn list_block_volumes_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_BLOCK_VOLUMES,
        "List block volumes in a compartment",
        Mutability::ReadOnly,
    )
    .with_parameter(compartment_param())
}

pub fn get_bucket_sizes_by_user_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_BUCKET_SIZES_BY_USER,
        "Report bucket storage usage in a compartment grouped by the creating user, largest first",
        Mutability::ReadOnly,
    )
    .with_parameter(compartment_param())
}

/// Object storage and block volume tools
pub struct StorageToolProvider {
    storage: Arc<dyn StorageApi>,
    usage: BucketUsageUseCase,
    max_pages: usize,
}

impl StorageToolProvider {
    pub fn new(storage: Arc<dyn StorageApi>, params: &ExecutionParams) -> Self {
        Self {
            usage: BucketUsageUseCase::new(Arc::clone(&storage), params),
            storage,
            max_pages: params.max_pages,
        }
    }

    async fn namespace_for(&self, call: &ToolCall) -> Result<String, ProviderError> {
        match call.get_string("namespace") {
            Some(ns) if !ns.is_empty() => Ok(ns.to_string()),
            _ => Ok(self.storage.namespace().await?),
        }
    }

    async fn list_buckets(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        let compartment_id = required(call, "compartment_id")?;
        let namespace = self.storage.namespace().await?;
        let storage = self.storage.as_ref();
        let namespace = namespace.as_str();

        let buckets = collect_pages(self.max_pages, move |token| {
            storage.list_buckets(namespace, compartment_id, token)
        })
        .await?;
        json_content(&buckets)
    }
}

#[async_trait]
impl ToolProvider for StorageToolProvider {
    fn id(&self) -> &str {
        "storage"
    }

    fn display_name(&self) -> &str {
        "Storage"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            list_buckets_definition(),
            get_bucket_definition(),
            list_objects_definition(),
            list_block_volumes_definition(),
            get_bucket_sizes_by_user_definition(),
        ]
    }

    async fn execute(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError> {
        match call.tool_name.as_str() {
            LIST_BUCKETS => self.list_buckets(call).await,
            GET_BUCKET => {
                let bucket_name = required(call, "bucket_name")?;
                let namespace = self.namespace_for(call).await?;
                json_content(&self.storage.get_bucket(&namespace, bucket_name).await?)
            }
            LIST_OBJECTS => {
                let bucket_name = required(call, "bucket_name")?;
                let namespace = self.namespace_for(call).await?;
                json_content(&self.storage.list_objects(&namespace, bucket_name).await?)
            }
            LIST_BLOCK_VOLUMES => {
                let compartment_id = required(call, "compartment_id")?;
                json_content(&self.storage.list_block_volumes(compartment_id).await?)
            }
            GET_BUCKET_SIZES_BY_USER => {
                let compartment_id = required(call, "compartment_id")?;
                json_content(&self.usage.execute(compartment_id).await?)
            }
            _ => Err(ProviderError::ToolNotFound(call.tool_name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::FakeStorage;

    fn provider(fake: Arc<FakeStorage>) -> StorageToolProvider {
        StorageToolProvider::new(fake, &ExecutionParams::default())
    }

    #[tokio::test]
    async fn test_get_bucket_defaults_namespace() {
        let fake = Arc::new(FakeStorage::default());
        let call = ToolCall::new(GET_BUCKET).with_arg("bucket_name", "logs");

        let content = provider(fake.clone()).execute(&call).await.unwrap();

        let payload: serde_json::Value = serde_json::from_str(content[0].as_text()).unwrap();
        assert_eq!(payload["name"], "logs");
        assert_eq!(payload["storage_tier"], "Standard");
        assert!(payload.get("approximate_size").is_none());
        assert_eq!(fake.namespaces_used(), vec!["tenancyns"]);
    }

    #[tokio::test]
    async fn test_get_bucket_explicit_namespace() {
        let fake = Arc::new(FakeStorage::default());
        let call = ToolCall::new(GET_BUCKET)
            .with_arg("bucket_name", "logs")
            .with_arg("namespace", "otherns");

        provider(fake.clone()).execute(&call).await.unwrap();
        assert_eq!(fake.namespaces_used(), vec!["otherns"]);
    }

    #[tokio::test]
    async fn test_list_buckets_walks_pages() {
        let fake = Arc::new(FakeStorage::default());
        let call = ToolCall::new(LIST_BUCKETS).with_arg("compartment_id", "c");

        let content = provider(fake).execute(&call).await.unwrap();

        let payload: serde_json::Value = serde_json::from_str(content[0].as_text()).unwrap();
        let names: Vec<&str> = payload
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["logs", "backups"]);
        assert_eq!(payload[0]["created_by"], "ocid1.user.oc1..alice");
    }

    #[tokio::test]
    async fn test_bucket_sizes_report_shape() {
        let fake = Arc::new(FakeStorage::default());
        let call = ToolCall::new(GET_BUCKET_SIZES_BY_USER).with_arg("compartment_id", "c");

        let content = provider(fake).execute(&call).await.unwrap();

        let report: serde_json::Value = serde_json::from_str(content[0].as_text()).unwrap();
        assert_eq!(report["namespace"], "tenancyns");
        assert_eq!(report["total_buckets"], 2);
        let top = &report["by_user"][0];
        assert_eq!(top["created_by"], "ocid1.user.oc1..bob");
        assert_eq!(top["total_gb"], 2.0);
        assert_eq!(top["buckets"][0]["approximate_size_bytes"], 2147483648u64);
    }
}
