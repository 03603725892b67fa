//! `oci` command line driver.
//!
//! Every cloud call is one `oci` invocation with the resolved profile's
//! global options in front:
//!
//! ```text
//! oci --config-file ~/.oci/config --profile PROD compute instance list --compartment-id ...
//! ```
//!
//! Successful calls print a JSON envelope `{"data": ..., "opc-next-page": ...}`
//! on stdout. Listings with no results print nothing. Provider failures
//! print `ServiceError:` followed by a JSON body on stderr; the code and
//! message in that body are passed through untouched.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ociops_domain::cloud::{CloudError, CredentialContext, Page};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::{debug, trace};

/// Raw result of one CLI process
#[derive(Debug, Clone, PartialEq)]
pub struct CliOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs the CLI with the given arguments
#[async_trait]
pub trait CliRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<CliOutput, CloudError>;
}

/// Runs the real `oci` binary as a child process.
pub struct ProcessRunner {
    program: PathBuf,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Runner for `program` resolved to an absolute path via `PATH`.
    pub fn locate(program: &str, timeout: Duration) -> Result<Self, CloudError> {
        let path = which::which(program)
            .map_err(|e| CloudError::Launch(format!("{program}: {e}")))?;
        debug!(program, path = %path.display(), "Located CLI binary");
        Ok(Self::new(path, timeout))
    }
}

#[async_trait]
impl CliRunner for ProcessRunner {
    async fn run(&self, args: &[String]) -> Result<CliOutput, CloudError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| CloudError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                CloudError::Launch(format!("{}: {}", self.program.display(), e))
            })?;

        Ok(CliOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(rename = "opc-next-page")]
    next_page: Option<String>,
}

/// CLI bound to one credential context
#[derive(Clone)]
pub struct OciCli {
    runner: Arc<dyn CliRunner>,
    global_args: Vec<String>,
}

impl OciCli {
    pub fn new(runner: Arc<dyn CliRunner>, context: &CredentialContext) -> Self {
        Self {
            runner,
            global_args: vec![
                "--config-file".to_string(),
                context.config_path.display().to_string(),
                "--profile".to_string(),
                context.profile.name().to_string(),
            ],
        }
    }

    /// Call returning a single record.
    pub async fn invoke<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, CloudError> {
        let stdout = self.call(args).await?;
        if stdout.trim().is_empty() {
            return Err(CloudError::Decode(format!(
                "empty response from `oci {}`",
                args.join(" ")
            )));
        }
        let envelope: Envelope<T> = decode(&stdout)?;
        Ok(envelope.data)
    }

    /// Call returning a full listing; no output means no results.
    pub async fn invoke_list<T: DeserializeOwned>(
        &self,
        args: &[&str],
    ) -> Result<Vec<T>, CloudError> {
        Ok(self.invoke_page(args).await?.items)
    }

    /// Call returning one page of a listing.
    pub async fn invoke_page<T: DeserializeOwned>(
        &self,
        args: &[&str],
    ) -> Result<Page<T>, CloudError> {
        let stdout = self.call(args).await?;
        if stdout.trim().is_empty() {
            return Ok(Page::empty());
        }
        let envelope: Envelope<Vec<T>> = decode(&stdout)?;
        Ok(Page::new(envelope.data, envelope.next_page))
    }

    async fn call(&self, args: &[&str]) -> Result<String, CloudError> {
        let full: Vec<String> = self
            .global_args
            .iter()
            .cloned()
            .chain(args.iter().map(|a| a.to_string()))
            .collect();
        debug!(command = %args.join(" "), "Invoking oci");

        let output = self.runner.run(&full).await?;
        trace!(exit = ?output.exit_code, stdout_len = output.stdout.len(), "oci returned");

        if output.success() {
            Ok(output.stdout)
        } else {
            Err(parse_failure(&output))
        }
    }
}

fn decode<T: DeserializeOwned>(stdout: &str) -> Result<T, CloudError> {
    serde_json::from_str(stdout).map_err(|e| CloudError::Decode(e.to_string()))
}

/// Map a failed invocation to a [`CloudError`].
pub(crate) fn parse_failure(output: &CliOutput) -> CloudError {
    service_error(&output.stderr).unwrap_or_else(|| CloudError::Cli {
        exit_code: output.exit_code,
        stderr: output.stderr.trim().to_string(),
    })
}

fn service_error(stderr: &str) -> Option<CloudError> {
    let (_, body) = stderr.split_once("ServiceError:")?;
    let body: serde_json::Value = serde_json::from_str(body.trim()).ok()?;

    Some(CloudError::Service {
        code: body.get("code")?.as_str()?.to_string(),
        message: body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string(),
        status: body
            .get("status")
            .and_then(|s| s.as_u64())
            .and_then(|s| u16::try_from(s).ok()),
        request_id: body
            .get("opc-request-id")
            .and_then(|r| r.as_str())
            .map(str::to_string),
    })
}
