//! Compute client

use async_trait::async_trait;
use ociops_application::ports::cloud::ComputeApi;
use ociops_domain::cloud::{CloudError, Instance, InstanceAction};

use super::cli::OciCli;

pub struct OciCompute {
    cli: OciCli,
}

impl OciCompute {
    pub fn new(cli: OciCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl ComputeApi for OciCompute {
    async fn list_instances(
        &self,
        compartment_id: &str,
        limit: u32,
    ) -> Result<Vec<Instance>, CloudError> {
        let limit = limit.to_string();
        self.cli
            .invoke_list(&[
                "compute",
                "instance",
                "list",
                "--compartment-id",
                compartment_id,
                "--limit",
                &limit,
            ])
            .await
    }

    async fn get_instance(&self, instance_id: &str) -> Result<Instance, CloudError> {
        self.cli
            .invoke(&["compute", "instance", "get", "--instance-id", instance_id])
            .await
    }

    async fn instance_action(
        &self,
        instance_id: &str,
        action: InstanceAction,
    ) -> Result<Instance, CloudError> {
        self.cli
            .invoke(&[
                "compute",
                "instance",
                "action",
                "--instance-id",
                instance_id,
                "--action",
                action.as_str(),
            ])
            .await
    }
}
