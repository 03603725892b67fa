//! Virtual network client

use async_trait::async_trait;
use ociops_application::ports::cloud::NetworkApi;
use ociops_domain::cloud::{CloudError, SecurityList, Subnet, Vcn};

use super::cli::OciCli;

pub struct OciNetwork {
    cli: OciCli,
}

impl OciNetwork {
    pub fn new(cli: OciCli) -> Self {
        Self { cli }
    }
}

/// `--vcn-id` is only passed when a filter is given.
fn scoped_args<'a>(
    base: &[&'a str],
    compartment_id: &'a str,
    vcn_id: Option<&'a str>,
) -> Vec<&'a str> {
    let mut args = base.to_vec();
    args.extend(["--compartment-id", compartment_id]);
    if let Some(vcn_id) = vcn_id {
        args.extend(["--vcn-id", vcn_id]);
    }
    args.push("--all");
    args
}

#[async_trait]
impl NetworkApi for OciNetwork {
    async fn list_vcns(&self, compartment_id: &str) -> Result<Vec<Vcn>, CloudError> {
        let args = scoped_args(&["network", "vcn", "list"], compartment_id, None);
        self.cli.invoke_list(&args).await
    }

    async fn list_subnets(
        &self,
        compartment_id: &str,
        vcn_id: Option<&str>,
    ) -> Result<Vec<Subnet>, CloudError> {
        let args = scoped_args(&["network", "subnet", "list"], compartment_id, vcn_id);
        self.cli.invoke_list(&args).await
    }

    async fn list_security_lists(
        &self,
        compartment_id: &str,
        vcn_id: Option<&str>,
    ) -> Result<Vec<SecurityList>, CloudError> {
        let args = scoped_args(
            &["network", "security-list", "list"],
            compartment_id,
            vcn_id,
        );
        self.cli.invoke_list(&args).await
    }
}
