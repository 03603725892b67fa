//! Identity client

use async_trait::async_trait;
use ociops_application::ports::cloud::IdentityApi;
use ociops_domain::cloud::{CloudError, Compartment, Group, Policy, User};

use super::cli::OciCli;

pub struct OciIdentity {
    cli: OciCli,
}

impl OciIdentity {
    pub fn new(cli: OciCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl IdentityApi for OciIdentity {
    async fn list_compartments(&self, parent_id: &str) -> Result<Vec<Compartment>, CloudError> {
        self.cli
            .invoke_list(&[
                "iam",
                "compartment",
                "list",
                "--compartment-id",
                parent_id,
                "--compartment-id-in-subtree",
                "true",
                "--access-level",
                "ACCESSIBLE",
                "--all",
            ])
            .await
    }

    async fn list_users(&self, tenancy_id: &str) -> Result<Vec<User>, CloudError> {
        self.cli
            .invoke_list(&["iam", "user", "list", "--compartment-id", tenancy_id, "--all"])
            .await
    }

    async fn list_groups(&self, tenancy_id: &str) -> Result<Vec<Group>, CloudError> {
        self.cli
            .invoke_list(&["iam", "group", "list", "--compartment-id", tenancy_id, "--all"])
            .await
    }

    async fn list_policies(&self, compartment_id: &str) -> Result<Vec<Policy>, CloudError> {
        self.cli
            .invoke_list(&["iam", "policy", "list", "--compartment-id", compartment_id, "--all"])
            .await
    }
}
