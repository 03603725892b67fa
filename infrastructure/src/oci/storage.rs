//! Object storage and block volume client

use async_trait::async_trait;
use ociops_application::ports::cloud::StorageApi;
use ociops_domain::cloud::{Bucket, BucketSummary, CloudError, ObjectSummary, Page, Volume};

use super::cli::OciCli;

pub struct OciStorage {
    cli: OciCli,
}

impl OciStorage {
    pub fn new(cli: OciCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl StorageApi for OciStorage {
    async fn namespace(&self) -> Result<String, CloudError> {
        self.cli.invoke(&["os", "ns", "get"]).await
    }

    async fn list_buckets(
        &self,
        namespace: &str,
        compartment_id: &str,
        page: Option<String>,
    ) -> Result<Page<BucketSummary>, CloudError> {
        let mut args = vec![
            "os",
            "bucket",
            "list",
            "--namespace-name",
            namespace,
            "--compartment-id",
            compartment_id,
        ];
        if let Some(token) = page.as_deref() {
            args.extend(["--page", token]);
        }
        self.cli.invoke_page(&args).await
    }

    async fn get_bucket(&self, namespace: &str, bucket_name: &str) -> Result<Bucket, CloudError> {
        self.cli
            .invoke(&[
                "os",
                "bucket",
                "get",
                "--namespace-name",
                namespace,
                "--bucket-name",
                bucket_name,
                "--fields",
                "approximateSize",
                "--fields",
                "approximateCount",
            ])
            .await
    }

    async fn list_objects(
        &self,
        namespace: &str,
        bucket_name: &str,
    ) -> Result<Vec<ObjectSummary>, CloudError> {
        self.cli
            .invoke_list(&[
                "os",
                "object",
                "list",
                "--namespace-name",
                namespace,
                "--bucket-name",
                bucket_name,
                "--fields",
                "name,size,timeCreated,timeModified,md5,storageTier",
            ])
            .await
    }

    async fn list_block_volumes(&self, compartment_id: &str) -> Result<Vec<Volume>, CloudError> {
        self.cli
            .invoke_list(&["bv", "volume", "list", "--compartment-id", compartment_id, "--all"])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oci::cli::testing::{FakeRunner, context};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_buckets_forwards_page_token() {
        let runner = FakeRunner::new(vec![FakeRunner::ok(json!({
            "data": [{
                "name": "logs",
                "namespace": "ns",
                "compartment-id": "c",
                "created-by": "ocid1.user.oc1..alice",
                "time-created": "2024-01-01T00:00:00+00:00"
            }],
            "opc-next-page": "next"
        }))]);
        let storage = OciStorage::new(OciCli::new(runner.clone(), &context()));

        let page = storage
            .list_buckets("ns", "c", Some("tok".to_string()))
            .await
            .unwrap();

        assert_eq!(page.items[0].created_by.as_deref(), Some("ocid1.user.oc1..alice"));
        assert_eq!(page.next_page.as_deref(), Some("next"));
        let args = runner.last_args();
        assert!(args.ends_with(&["--page".to_string(), "tok".to_string()]));
    }

    #[tokio::test]
    async fn test_first_page_has_no_token() {
        let runner = FakeRunner::new(vec![]);
        let storage = OciStorage::new(OciCli::new(runner.clone(), &context()));

        let page = storage.list_buckets("ns", "c", None).await.unwrap();

        assert!(page.items.is_empty());
        assert!(!runner.last_args().contains(&"--page".to_string()));
    }

    #[tokio::test]
    async fn test_get_bucket_requests_approximate_fields() {
        let runner = FakeRunner::new(vec![FakeRunner::ok(json!({
            "data": {
                "name": "logs",
                "namespace": "ns",
                "compartment-id": "c",
                "storage-tier": "Standard",
                "public-access-type": "NoPublicAccess",
                "versioning": "Disabled",
                "time-created": "2024-01-01T00:00:00+00:00",
                "etag": "e1",
                "created-by": "ocid1.user.oc1..alice",
                "approximate-size": 1073741824u64,
                "approximate-count": 12
            }
        }))]);
        let storage = OciStorage::new(OciCli::new(runner.clone(), &context()));

        let bucket = storage.get_bucket("ns", "logs").await.unwrap();

        assert_eq!(bucket.approximate_size, Some(1073741824));
        assert_eq!(bucket.approximate_count, Some(12));
        assert!(runner.last_args().contains(&"approximateSize".to_string()));
    }
}
