//! Resource Client Factory backed by the `oci` CLI.
//!
//! The credential store is read once, on the first `resolve`; every
//! client built afterwards shares that context.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use ociops_application::ports::cloud::{ClientFactoryPort, CloudClients, DomainClient};
use ociops_domain::cloud::{
    CloudError, CredentialContext, CredentialError, CredentialProfile, ResourceDomain,
};
use tracing::info;

use super::cli::{CliRunner, OciCli, ProcessRunner};
use super::compute::OciCompute;
use super::config_file::OciConfigFile;
use super::identity::OciIdentity;
use super::network::OciNetwork;
use super::storage::OciStorage;

/// Where to find credentials and how to run the CLI
#[derive(Debug, Clone)]
pub struct OciSettings {
    pub config_path: PathBuf,
    pub profile: CredentialProfile,
    pub cli_path: String,
    pub command_timeout: Duration,
}

pub struct OciClientFactory {
    settings: OciSettings,
    runner: Arc<dyn CliRunner>,
    context: OnceLock<Arc<CredentialContext>>,
}

impl OciClientFactory {
    /// Factory running the real CLI binary; fails if it is not on `PATH`.
    pub fn new(settings: OciSettings) -> Result<Self, CloudError> {
        let runner = ProcessRunner::locate(&settings.cli_path, settings.command_timeout)?;
        Ok(Self::with_runner(settings, Arc::new(runner)))
    }

    pub fn with_runner(settings: OciSettings, runner: Arc<dyn CliRunner>) -> Self {
        Self {
            settings,
            runner,
            context: OnceLock::new(),
        }
    }

    pub fn settings(&self) -> &OciSettings {
        &self.settings
    }

    fn cli(&self) -> Result<OciCli, CredentialError> {
        let context = self.resolve()?;
        Ok(OciCli::new(Arc::clone(&self.runner), &context))
    }
}

impl ClientFactoryPort for OciClientFactory {
    fn resolve(&self) -> Result<Arc<CredentialContext>, CredentialError> {
        if let Some(context) = self.context.get() {
            return Ok(Arc::clone(context));
        }

        let context = OciConfigFile::load(&self.settings.config_path)?
            .resolve(&self.settings.profile)?;
        info!(
            profile = %context.profile,
            region = %context.region,
            "Loaded OCI credentials"
        );

        Ok(Arc::clone(self.context.get_or_init(|| Arc::new(context))))
    }

    fn client_for(&self, domain: ResourceDomain) -> Result<DomainClient, CredentialError> {
        let cli = self.cli()?;
        Ok(match domain {
            ResourceDomain::Compute => DomainClient::Compute(Arc::new(OciCompute::new(cli))),
            ResourceDomain::Network => DomainClient::Network(Arc::new(OciNetwork::new(cli))),
            ResourceDomain::Storage => DomainClient::Storage(Arc::new(OciStorage::new(cli))),
            ResourceDomain::Identity => DomainClient::Identity(Arc::new(OciIdentity::new(cli))),
        })
    }

    fn clients(&self) -> Result<CloudClients, CredentialError> {
        let cli = self.cli()?;
        Ok(CloudClients {
            compute: Arc::new(OciCompute::new(cli.clone())),
            network: Arc::new(OciNetwork::new(cli.clone())),
            storage: Arc::new(OciStorage::new(cli.clone())),
            identity: Arc::new(OciIdentity::new(cli)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oci::cli::testing::FakeRunner;
    use ociops_application::ports::cloud::StorageApi;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings(config_path: PathBuf, profile: &str) -> OciSettings {
        OciSettings {
            config_path,
            profile: CredentialProfile::new(profile),
            cli_path: "oci".to_string(),
            command_timeout: Duration::from_secs(30),
        }
    }

    fn write_store(key: &NamedTempFile) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[PROD]\nuser=u\nfingerprint=f\nkey_file={}\ntenancy=t\nregion=us-phoenix-1\n",
            key.path().display()
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_profile_fails_before_any_call() {
        let key = NamedTempFile::new().unwrap();
        let store = write_store(&key);
        let runner = FakeRunner::new(vec![]);
        let factory =
            OciClientFactory::with_runner(settings(store.path().to_path_buf(), "STAGE"), runner.clone());

        let err = factory.client_for(ResourceDomain::Storage).err().unwrap();

        assert!(matches!(err, CredentialError::ProfileNotFound { .. }));
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_context_resolved_once() {
        let key = NamedTempFile::new().unwrap();
        let store = write_store(&key);
        let factory = OciClientFactory::with_runner(
            settings(store.path().to_path_buf(), "PROD"),
            FakeRunner::new(vec![]),
        );

        let first = factory.resolve().unwrap();
        std::fs::remove_file(store.path()).unwrap();
        let second = factory.resolve().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(factory.clients().is_ok());
    }

    #[tokio::test]
    async fn test_clients_use_the_selected_profile() {
        let key = NamedTempFile::new().unwrap();
        let store = write_store(&key);
        let runner = FakeRunner::new(vec![FakeRunner::ok(serde_json::json!({"data": "ns"}))]);
        let factory =
            OciClientFactory::with_runner(settings(store.path().to_path_buf(), "PROD"), runner.clone());

        let DomainClient::Storage(storage) = factory.client_for(ResourceDomain::Storage).unwrap()
        else {
            panic!("expected storage client");
        };
        assert_eq!(storage.namespace().await.unwrap(), "ns");

        let args = runner.last_args();
        assert_eq!(args[2..4], ["--profile".to_string(), "PROD".to_string()]);
    }

    #[test]
    fn test_new_fails_when_cli_not_on_path() {
        let mut settings = settings(PathBuf::from("/nonexistent/config"), "PROD");
        settings.cli_path = "ociops-no-such-cli".to_string();

        let err = OciClientFactory::new(settings).err().unwrap();
        assert_eq!(err.code(), "CliUnavailable");
    }
}
