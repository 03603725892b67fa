//! Bucket usage by owner.
//!
//! 1. Walk every page of the bucket listing for a compartment.
//! 2. Fetch the detail of every bucket (bounded concurrency, results kept
//!    in listing order).
//! 3. Group, total and sort via [`UsageReport::build`].
//!
//! Any failed detail fetch aborts the whole report; there is no
//! partial-report mode.

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};
use ociops_domain::cloud::{Bucket, CloudError};
use ociops_domain::usage::UsageReport;
use tracing::{debug, info};

use super::pagination::collect_pages;
use crate::config::ExecutionParams;
use crate::ports::cloud::StorageApi;

/// Use case behind `get_bucket_sizes_by_user`
pub struct BucketUsageUseCase {
    storage: Arc<dyn StorageApi>,
    max_pages: usize,
    detail_concurrency: usize,
}

impl BucketUsageUseCase {
    pub fn new(storage: Arc<dyn StorageApi>, params: &ExecutionParams) -> Self {
        Self {
            storage,
            max_pages: params.max_pages,
            detail_concurrency: params.detail_concurrency.max(1),
        }
    }

    /// Build the report for `compartment_id`, resolving the namespace first.
    pub async fn execute(&self, compartment_id: &str) -> Result<UsageReport, CloudError> {
        let namespace = self.storage.namespace().await?;
        self.execute_in(&namespace, compartment_id).await
    }

    /// Build the report for a known namespace.
    pub async fn execute_in(
        &self,
        namespace: &str,
        compartment_id: &str,
    ) -> Result<UsageReport, CloudError> {
        let storage = self.storage.as_ref();

        let summaries = collect_pages(self.max_pages, move |token| {
            storage.list_buckets(namespace, compartment_id, token)
        })
        .await?;
        debug!(buckets = summaries.len(), "Collected bucket summaries");

        // Built up front: a lazy map over borrowed summaries is not `Send`.
        let fetches: Vec<_> = summaries
            .iter()
            .map(|summary| storage.get_bucket(namespace, &summary.name))
            .collect();
        let details: Vec<Bucket> = stream::iter(fetches)
            .buffered(self.detail_concurrency)
            .try_collect()
            .await?;

        let report = UsageReport::build(namespace, compartment_id, &summaries, &details);
        info!(
            buckets = report.total_buckets,
            owners = report.by_user.len(),
            total_bytes = report.total_bytes(),
            "Bucket usage aggregated"
        );
        Ok(report)
    }
}
