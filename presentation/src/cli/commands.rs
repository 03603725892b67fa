//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ociops
#[derive(Parser, Debug)]
#[command(name = "ociops")]
#[command(author, version, about = "Ask questions about your OCI tenancy in plain language")]
#[command(long_about = r#"
ociops answers operator questions about an Oracle Cloud tenancy. A model
reads the query, calls typed tools (compute, network, storage, identity)
through the `oci` command line client and narrates the answer as it goes.

Only start_instance and stop_instance change anything. Pass
--confirm-mutations to be asked before either one runs.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./ociops.toml       Project-level config
3. ~/.config/ociops/config.toml   Global config

Example:
  ociops -q "List running instances in compartment ocid1.compartment.oc1..aaaa"
  ociops -q "Which users own the most bucket storage?" --profile PROD
  ociops -q "Stop instance ocid1.instance.oc1..bbbb" --confirm-mutations
"#)]
pub struct Cli {
    /// The question to ask about the tenancy
    #[arg(short, long, value_name = "TEXT", required_unless_present = "show_config")]
    pub query: Option<String>,

    /// Credential profile in the OCI config file
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model identifier for the reasoning runtime
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Ask before running start_instance / stop_instance
    #[arg(long)]
    pub confirm_mutations: bool,

    /// Hide the tool activity spinner
    #[arg(long)]
    pub no_tool_activity: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
