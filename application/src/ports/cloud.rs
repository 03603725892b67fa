//! Cloud client ports
//!
//! One trait per resource domain. Implementations (adapters) live in the
//! infrastructure layer; the tool handlers and the usage aggregation only
//! see these traits.
//!
//! Clients are derived from one resolved [`CredentialContext`] and are
//! handed to every handler at construction, so credentials are resolved
//! once per session rather than once per call.

use std::sync::Arc;

use async_trait::async_trait;
use ociops_domain::cloud::{
    Bucket, BucketSummary, CloudError, Compartment, CredentialContext, CredentialError, Group,
    Instance, InstanceAction, ObjectSummary, Page, Policy, ResourceDomain, SecurityList, Subnet,
    User, Vcn, Volume,
};

#[async_trait]
pub trait ComputeApi: Send + Sync {
    async fn list_instances(
        &self,
        compartment_id: &str,
        limit: u32,
    ) -> Result<Vec<Instance>, CloudError>;

    async fn get_instance(&self, instance_id: &str) -> Result<Instance, CloudError>;

    /// Send a lifecycle action; returns the instance as the provider reports it afterwards.
    async fn instance_action(
        &self,
        instance_id: &str,
        action: InstanceAction,
    ) -> Result<Instance, CloudError>;
}

#[async_trait]
pub trait NetworkApi: Send + Sync {
    async fn list_vcns(&self, compartment_id: &str) -> Result<Vec<Vcn>, CloudError>;

    async fn list_subnets(
        &self,
        compartment_id: &str,
        vcn_id: Option<&str>,
    ) -> Result<Vec<Subnet>, CloudError>;

    async fn list_security_lists(
        &self,
        compartment_id: &str,
        vcn_id: Option<&str>,
    ) -> Result<Vec<SecurityList>, CloudError>;
}

#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Object storage namespace of the tenancy
    async fn namespace(&self) -> Result<String, CloudError>;

    /// One page of the bucket listing; `page` is the token from the previous page.
    async fn list_buckets(
        &self,
        namespace: &str,
        compartment_id: &str,
        page: Option<String>,
    ) -> Result<Page<BucketSummary>, CloudError>;

    /// Bucket detail including approximate size and object count.
    async fn get_bucket(&self, namespace: &str, bucket_name: &str) -> Result<Bucket, CloudError>;

    async fn list_objects(
        &self,
        namespace: &str,
        bucket_name: &str,
    ) -> Result<Vec<ObjectSummary>, CloudError>;

    async fn list_block_volumes(&self, compartment_id: &str) -> Result<Vec<Volume>, CloudError>;
}

#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Every compartment under `parent_id`, whole subtree.
    async fn list_compartments(&self, parent_id: &str) -> Result<Vec<Compartment>, CloudError>;

    async fn list_users(&self, tenancy_id: &str) -> Result<Vec<User>, CloudError>;

    async fn list_groups(&self, tenancy_id: &str) -> Result<Vec<Group>, CloudError>;

    async fn list_policies(&self, compartment_id: &str) -> Result<Vec<Policy>, CloudError>;
}

/// Client for one resource domain
#[derive(Clone)]
pub enum DomainClient {
    Compute(Arc<dyn ComputeApi>),
    Network(Arc<dyn NetworkApi>),
    Storage(Arc<dyn StorageApi>),
    Identity(Arc<dyn IdentityApi>),
}

impl DomainClient {
    pub fn domain(&self) -> ResourceDomain {
        match self {
            DomainClient::Compute(_) => ResourceDomain::Compute,
            DomainClient::Network(_) => ResourceDomain::Network,
            DomainClient::Storage(_) => ResourceDomain::Storage,
            DomainClient::Identity(_) => ResourceDomain::Identity,
        }
    }
}

/// One client per resource domain, all sharing a credential context
#[derive(Clone)]
pub struct CloudClients {
    pub compute: Arc<dyn ComputeApi>,
    pub network: Arc<dyn NetworkApi>,
    pub storage: Arc<dyn StorageApi>,
    pub identity: Arc<dyn IdentityApi>,
}

/// Port for the Resource Client Factory.
///
/// `resolve` reads and validates the credential store once; later calls
/// return the cached context. `client_for` never re-reads credentials.
pub trait ClientFactoryPort: Send + Sync {
    fn resolve(&self) -> Result<Arc<CredentialContext>, CredentialError>;

    fn client_for(&self, domain: ResourceDomain) -> Result<DomainClient, CredentialError>;

    /// Build the full client set from the same context.
    fn clients(&self) -> Result<CloudClients, CredentialError>;
}
