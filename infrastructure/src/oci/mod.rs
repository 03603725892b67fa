//! Oracle Cloud adapter.
//!
//! Implements the cloud client ports by driving the `oci` command line
//! client. [`OciClientFactory`] resolves the credential profile once and
//! hands every domain client the same context.

pub mod cli;
pub mod compute;
pub mod config_file;
pub mod factory;
pub mod identity;
pub mod network;
pub mod storage;

pub use cli::{CliOutput, CliRunner, OciCli, ProcessRunner};
pub use config_file::{OciConfigFile, expand_home};
pub use factory::{OciClientFactory, OciSettings};
