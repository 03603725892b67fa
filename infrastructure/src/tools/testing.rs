//! In-memory cloud clients for the tool tests.

use std::sync::Mutex;

use async_trait::async_trait;
use ociops_application::ports::cloud::{ComputeApi, IdentityApi, NetworkApi, StorageApi};
use ociops_domain::cloud::{
    Bucket, BucketSummary, CloudError, Compartment, Group, Instance, InstanceAction,
    ObjectSummary, Page, Policy, SecurityList, Subnet, User, Vcn, Volume,
};
use serde_json::json;

const TIME: &str = "2024-01-01T00:00:00+00:00";

pub(crate) fn instance(id: &str, name: &str, state: &str) -> Instance {
    Instance {
        id: id.to_string(),
        display_name: name.to_string(),
        lifecycle_state: state.to_string(),
        shape: "VM.Standard.E4.Flex".to_string(),
        compartment_id: "ocid1.compartment.oc1..c".to_string(),
        region: "iad".to_string(),
        availability_domain: "Uocm:US-ASHBURN-AD-1".to_string(),
        time_created: TIME.to_string(),
    }
}

// ==================== Compute ====================

pub(crate) struct FakeCompute {
    instances: Vec<Instance>,
    pub(crate) actions: Mutex<Vec<(String, InstanceAction)>>,
    pub(crate) last_limit: Mutex<Option<u32>>,
}

impl FakeCompute {
    pub(crate) fn new(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            actions: Mutex::new(Vec::new()),
            last_limit: Mutex::new(None),
        }
    }

    fn find(&self, instance_id: &str) -> Result<Instance, CloudError> {
        self.instances
            .iter()
            .find(|i| i.id == instance_id)
            .cloned()
            .ok_or_else(|| CloudError::Service {
                code: "NotAuthorizedOrNotFound".to_string(),
                message: "Authorization failed or requested resource not found.".to_string(),
                status: Some(404),
                request_id: None,
            })
    }
}

#[async_trait]
impl ComputeApi for FakeCompute {
    async fn list_instances(&self, _: &str, limit: u32) -> Result<Vec<Instance>, CloudError> {
        *self.last_limit.lock().unwrap() = Some(limit);
        Ok(self.instances.iter().take(limit as usize).cloned().collect())
    }

    async fn get_instance(&self, instance_id: &str) -> Result<Instance, CloudError> {
        self.find(instance_id)
    }

    async fn instance_action(
        &self,
        instance_id: &str,
        action: InstanceAction,
    ) -> Result<Instance, CloudError> {
        let mut instance = self.find(instance_id)?;
        self.actions
            .lock()
            .unwrap()
            .push((instance_id.to_string(), action));
        instance.lifecycle_state = match action {
            InstanceAction::Start => "STARTING",
            InstanceAction::SoftStop => "STOPPING",
        }
        .to_string();
        Ok(instance)
    }
}

// ==================== Network ====================

#[derive(Default)]
pub(crate) struct FakeNetwork {
    pub(crate) last_vcn_filter: Mutex<Option<String>>,
}

#[async_trait]
impl NetworkApi for FakeNetwork {
    async fn list_vcns(&self, _: &str) -> Result<Vec<Vcn>, CloudError> {
        Ok(vec![Vcn {
            id: "ocid1.vcn.oc1..v".to_string(),
            display_name: "main-vcn".to_string(),
            cidr_block: Some("10.0.0.0/16".to_string()),
            lifecycle_state: "AVAILABLE".to_string(),
            dns_label: Some("main".to_string()),
            time_created: TIME.to_string(),
        }])
    }

    async fn list_subnets(&self, _: &str, vcn_id: Option<&str>) -> Result<Vec<Subnet>, CloudError> {
        *self.last_vcn_filter.lock().unwrap() = vcn_id.map(str::to_string);
        Ok(Vec::new())
    }

    async fn list_security_lists(
        &self,
        _: &str,
        _: Option<&str>,
    ) -> Result<Vec<SecurityList>, CloudError> {
        Ok(vec![SecurityList {
            id: "ocid1.securitylist.oc1..s".to_string(),
            display_name: "Default Security List".to_string(),
            lifecycle_state: "AVAILABLE".to_string(),
            vcn_id: "ocid1.vcn.oc1..v".to_string(),
            egress_security_rules: vec![json!({"destination": "0.0.0.0/0"})],
            ingress_security_rules: vec![
                json!({"source": "0.0.0.0/0", "protocol": "6"}),
                json!({"source": "10.0.0.0/16"}),
            ],
        }])
    }
}

// ==================== Storage ====================

/// Two listing pages: `logs` (alice, 1 GiB) then `backups` (bob, 2 GiB).
pub(crate) struct FakeStorage {
    namespaces: Mutex<Vec<String>>,
}

impl Default for FakeStorage {
    fn default() -> Self {
        Self {
            namespaces: Mutex::new(Vec::new()),
        }
    }
}

impl FakeStorage {
    pub(crate) fn namespaces_used(&self) -> Vec<String> {
        self.namespaces.lock().unwrap().clone()
    }

    fn summary(name: &str, created_by: Option<&str>) -> BucketSummary {
        BucketSummary {
            name: name.to_string(),
            namespace: "tenancyns".to_string(),
            compartment_id: "c".to_string(),
            created_by: created_by.map(str::to_string),
            time_created: TIME.to_string(),
        }
    }
}

#[async_trait]
impl StorageApi for FakeStorage {
    async fn namespace(&self) -> Result<String, CloudError> {
        Ok("tenancyns".to_string())
    }

    async fn list_buckets(
        &self,
        _: &str,
        _: &str,
        page: Option<String>,
    ) -> Result<Page<BucketSummary>, CloudError> {
        Ok(match page.as_deref() {
            None => Page::new(
                vec![Self::summary("logs", Some("ocid1.user.oc1..alice"))],
                Some("p2".to_string()),
            ),
            _ => Page::last(vec![Self::summary("backups", None)]),
        })
    }

    async fn get_bucket(&self, namespace: &str, bucket_name: &str) -> Result<Bucket, CloudError> {
        self.namespaces.lock().unwrap().push(namespace.to_string());
        let (created_by, size) = match bucket_name {
            "backups" => ("ocid1.user.oc1..bob", 2 * 1024 * 1024 * 1024),
            _ => ("ocid1.user.oc1..alice", 1024 * 1024 * 1024),
        };
        Ok(Bucket {
            name: bucket_name.to_string(),
            namespace: namespace.to_string(),
            compartment_id: "c".to_string(),
            storage_tier: Some("Standard".to_string()),
            public_access_type: Some("NoPublicAccess".to_string()),
            versioning: Some("Disabled".to_string()),
            time_created: TIME.to_string(),
            etag: Some("etag-1".to_string()),
            created_by: Some(created_by.to_string()),
            approximate_size: Some(size),
            approximate_count: Some(10),
        })
    }

    async fn list_objects(
        &self,
        namespace: &str,
        _: &str,
    ) -> Result<Vec<ObjectSummary>, CloudError> {
        self.namespaces.lock().unwrap().push(namespace.to_string());
        Ok(Vec::new())
    }

    async fn list_block_volumes(&self, _: &str) -> Result<Vec<Volume>, CloudError> {
        Ok(Vec::new())
    }
}

// ==================== Identity ====================

pub(crate) struct FakeIdentity;

#[async_trait]
impl IdentityApi for FakeIdentity {
    async fn list_compartments(&self, _: &str) -> Result<Vec<Compartment>, CloudError> {
        Ok(Vec::new())
    }

    async fn list_users(&self, _: &str) -> Result<Vec<User>, CloudError> {
        Ok(vec![User {
            id: "ocid1.user.oc1..ops".to_string(),
            name: "ops".to_string(),
            description: None,
            lifecycle_state: "ACTIVE".to_string(),
            email: Some("ops@example.com".to_string()),
            is_mfa_activated: true,
            time_created: TIME.to_string(),
        }])
    }

    async fn list_groups(&self, _: &str) -> Result<Vec<Group>, CloudError> {
        Ok(Vec::new())
    }

    async fn list_policies(&self, _: &str) -> Result<Vec<Policy>, CloudError> {
        Ok(vec![Policy {
            id: "ocid1.policy.oc1..p".to_string(),
            name: "admins".to_string(),
            description: Some("Tenancy admins".to_string()),
            lifecycle_state: "ACTIVE".to_string(),
            statements: vec!["Allow group Admins to manage all-resources in tenancy".to_string()],
            time_created: TIME.to_string(),
        }])
    }
}
