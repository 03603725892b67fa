//! Typed records returned by the cloud provider.
//!
//! The provider speaks kebab-case (`display-name`, `lifecycle-state`);
//! tool payloads use snake_case. Required fields are plain types so a
//! malformed response fails to decode instead of surfacing later as a
//! missing attribute. Identifiers are opaque strings.

use serde::{Deserialize, Serialize};

/// One page of a listing plus the continuation token, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page: Option<String>) -> Self {
        Self { items, next_page }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }
}

/// Lifecycle action sent to a compute instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceAction {
    Start,
    SoftStop,
}

impl InstanceAction {
    /// Provider verb
    pub fn as_str(&self) -> &str {
        match self {
            InstanceAction::Start => "START",
            InstanceAction::SoftStop => "SOFTSTOP",
        }
    }
}

impl std::fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Compute ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Instance {
    pub id: String,
    pub display_name: String,
    pub lifecycle_state: String,
    pub shape: String,
    pub compartment_id: String,
    pub region: String,
    pub availability_domain: String,
    pub time_created: String,
}

// ==================== Network ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Vcn {
    pub id: String,
    pub display_name: String,
    pub cidr_block: Option<String>,
    pub lifecycle_state: String,
    pub dns_label: Option<String>,
    pub time_created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Subnet {
    pub id: String,
    pub display_name: String,
    pub cidr_block: String,
    pub vcn_id: String,
    /// `None` for regional subnets
    pub availability_domain: Option<String>,
    pub lifecycle_state: String,
    pub dns_label: Option<String>,
}

/// Security list as returned by the provider, rules included
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SecurityList {
    pub id: String,
    pub display_name: String,
    pub lifecycle_state: String,
    pub vcn_id: String,
    #[serde(default)]
    pub egress_security_rules: Vec<serde_json::Value>,
    #[serde(default)]
    pub ingress_security_rules: Vec<serde_json::Value>,
}

/// Security list payload: rule counts instead of rule bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityListSummary {
    pub id: String,
    pub display_name: String,
    pub lifecycle_state: String,
    pub vcn_id: String,
    pub egress_security_rules_count: usize,
    pub ingress_security_rules_count: usize,
}

impl From<&SecurityList> for SecurityListSummary {
    fn from(list: &SecurityList) -> Self {
        Self {
            id: list.id.clone(),
            display_name: list.display_name.clone(),
            lifecycle_state: list.lifecycle_state.clone(),
            vcn_id: list.vcn_id.clone(),
            egress_security_rules_count: list.egress_security_rules.len(),
            ingress_security_rules_count: list.ingress_security_rules.len(),
        }
    }
}

// ==================== Storage ====================

/// Bucket as it appears on a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct BucketSummary {
    pub name: String,
    pub namespace: String,
    pub compartment_id: String,
    pub created_by: Option<String>,
    pub time_created: String,
}

/// Full bucket detail.
///
/// `created_by` and the approximate figures feed the usage report; they
/// are not part of the `get_bucket` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Bucket {
    pub name: String,
    pub namespace: String,
    pub compartment_id: String,
    pub storage_tier: Option<String>,
    pub public_access_type: Option<String>,
    pub versioning: Option<String>,
    pub time_created: String,
    pub etag: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub approximate_size: Option<u64>,
    #[serde(default, skip_serializing)]
    pub approximate_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct ObjectSummary {
    pub name: String,
    pub size: Option<u64>,
    pub time_modified: Option<String>,
    pub md5: Option<String>,
    pub storage_tier: Option<String>,
}

/// Block volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Volume {
    pub id: String,
    pub display_name: String,
    pub lifecycle_state: String,
    pub size_in_gbs: Option<u64>,
    pub availability_domain: String,
    pub vpus_per_gb: Option<u64>,
    pub time_created: String,
}

// ==================== Identity ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Compartment {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub lifecycle_state: String,
    pub compartment_id: String,
    pub time_created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct User {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub lifecycle_state: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_mfa_activated: bool,
    pub time_created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub lifecycle_state: String,
    pub time_created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "kebab-case"))]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub lifecycle_state: String,
    #[serde(default)]
    pub statements: Vec<String>,
    pub time_created: String,
}
