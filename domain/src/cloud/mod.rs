//! Cloud provider vocabulary: resource domains, records, credentials and errors.

pub mod credentials;
pub mod error;
pub mod resources;

pub use credentials::{CredentialContext, CredentialError, CredentialProfile, DEFAULT_PROFILE};
pub use error::CloudError;
pub use resources::{
    Bucket, BucketSummary, Compartment, Group, Instance, InstanceAction, ObjectSummary, Page,
    Policy, SecurityList, SecurityListSummary, Subnet, User, Vcn, Volume,
};

/// Resource domain served by one client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceDomain {
    Compute,
    Network,
    Storage,
    Identity,
}

impl ResourceDomain {
    pub const ALL: [ResourceDomain; 4] = [
        ResourceDomain::Compute,
        ResourceDomain::Network,
        ResourceDomain::Storage,
        ResourceDomain::Identity,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ResourceDomain::Compute => "compute",
            ResourceDomain::Network => "network",
            ResourceDomain::Storage => "storage",
            ResourceDomain::Identity => "identity",
        }
    }
}

impl std::fmt::Display for ResourceDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
