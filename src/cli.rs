use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::OutputFormat;

/// Reconcile VLAN presence across core/TOR switches and firewalls from
/// cached command output dumps.
#[derive(Parser, Debug)]
#[command(name = "vlan-audit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root directory of the per-device JSON dumps
    #[arg(long, global = true, value_name = "DIR")]
    pub configs_dir: Option<PathBuf>,

    /// Directory reports are written to
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON topology file; the built-in topology is used when omitted
    #[arg(long, global = true, value_name = "PATH")]
    pub topology: Option<PathBuf>,

    /// Output format, repeatable
    #[arg(long = "format", global = true, value_enum)]
    pub formats: Vec<OutputFormat>,

    /// Path component below the configs dir that holds the hostname
    #[arg(long, global = true, value_name = "N")]
    pub hostname_depth: Option<usize>,

    /// Fail on malformed dumps instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// VLAN presence matrix across every switch and firewall
    Matrix,
    /// Per-zone has/missing VLAN comparison of core and TOR switches
    Zones,
    /// VLANs present in one data center but not the other
    DcDiff,
    /// VLAN list per core/TOR switch
    Inventory,
    /// Each switch against the VLANs most of its group carries
    Regions,
    /// Every report
    All,
}
