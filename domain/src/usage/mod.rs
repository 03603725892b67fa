//! Bucket storage usage grouped by owning identity.
//!
//! The owner of a bucket is only known from its detail record, so the
//! report is built from listing summaries paired with their details.
//! This module holds the pure half of the aggregation: grouping,
//! totals, ordering and gigabyte rounding. Fetching lives in the
//! application layer.
//!
//! Ordering is fully determined by the input: buckets inside a group are
//! sorted by size descending, groups by total bytes descending, and both
//! sorts are stable so ties keep listing order.

use std::collections::HashMap;

use serde::Serialize;

use crate::cloud::resources::{Bucket, BucketSummary};

/// 2^30 bytes
pub const GIB: u64 = 1 << 30;

/// Owner key used when neither the detail nor the summary names a creator
pub const UNKNOWN_OWNER: &str = "unknown";

/// Convert bytes to GiB rounded to three decimals.
///
/// Display only; the byte count stays authoritative.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    let gb = bytes as f64 / GIB as f64;
    (gb * 1000.0).round() / 1000.0
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Owner key for one bucket: detail creator, then summary creator, then [`UNKNOWN_OWNER`].
pub fn owner_of<'a>(summary: &'a BucketSummary, detail: &'a Bucket) -> &'a str {
    non_blank(detail.created_by.as_deref())
        .or_else(|| non_blank(summary.created_by.as_deref()))
        .unwrap_or(UNKNOWN_OWNER)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketUsage {
    pub name: String,
    pub approximate_size_bytes: u64,
    pub approximate_size_gb: f64,
    pub approximate_object_count: u64,
    pub storage_tier: Option<String>,
    pub time_created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerUsage {
    pub created_by: String,
    pub total_bytes: u64,
    pub total_gb: f64,
    pub total_objects: u64,
    pub bucket_count: usize,
    pub buckets: Vec<BucketUsage>,
}

impl OwnerUsage {
    fn new(created_by: &str) -> Self {
        Self {
            created_by: created_by.to_string(),
            total_bytes: 0,
            total_gb: 0.0,
            total_objects: 0,
            bucket_count: 0,
            buckets: Vec::new(),
        }
    }

    fn add(&mut self, bucket: BucketUsage) {
        self.total_bytes += bucket.approximate_size_bytes;
        self.total_objects += bucket.approximate_object_count;
        self.bucket_count += 1;
        self.buckets.push(bucket);
    }

    fn finish(&mut self) {
        self.total_gb = bytes_to_gb(self.total_bytes);
        self.buckets
            .sort_by(|a, b| b.approximate_size_bytes.cmp(&a.approximate_size_bytes));
    }
}

/// The `get_bucket_sizes_by_user` payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    pub namespace: String,
    pub compartment_id: String,
    /// Number of bucket summaries collected by the page walk
    pub total_buckets: usize,
    pub by_user: Vec<OwnerUsage>,
}

impl UsageReport {
    /// Group `details` by owner.
    ///
    /// `summaries[i]` and `details[i]` describe the same bucket.
    pub fn build(
        namespace: impl Into<String>,
        compartment_id: impl Into<String>,
        summaries: &[BucketSummary],
        details: &[Bucket],
    ) -> Self {
        let mut groups: Vec<OwnerUsage> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (summary, detail) in summaries.iter().zip(details) {
            let owner = owner_of(summary, detail);
            let slot = match index.get(owner) {
                Some(&slot) => slot,
                None => {
                    groups.push(OwnerUsage::new(owner));
                    index.insert(owner.to_string(), groups.len() - 1);
                    groups.len() - 1
                }
            };

            let size = detail.approximate_size.unwrap_or(0);
            groups[slot].add(BucketUsage {
                name: detail.name.clone(),
                approximate_size_bytes: size,
                approximate_size_gb: bytes_to_gb(size),
                approximate_object_count: detail.approximate_count.unwrap_or(0),
                storage_tier: detail.storage_tier.clone(),
                time_created: detail.time_created.clone(),
            });
        }

        for group in &mut groups {
            group.finish();
        }
        groups.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes));

        Self {
            namespace: namespace.into(),
            compartment_id: compartment_id.into(),
            total_buckets: summaries.len(),
            by_user: groups,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.by_user.iter().map(|g| g.total_bytes).sum()
    }
}
