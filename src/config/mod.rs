use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::report::OutputFormat;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub configs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub topology_path: Option<PathBuf>,
    pub formats: Vec<OutputFormat>,
    pub hostname_depth: usize,
    pub strict: bool,
    pub vlan_file: String,
    pub svi_file: String,
    pub firewall_file: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        let topology = get_env("VLAN_AUDIT_TOPOLOGY", "");
        Self {
            configs_dir: PathBuf::from(get_env("VLAN_AUDIT_CONFIGS_DIR", "configs")),
            output_dir: PathBuf::from(get_env("VLAN_AUDIT_OUTPUT_DIR", "outputs")),
            topology_path: (!topology.is_empty()).then(|| PathBuf::from(topology)),
            formats: parse_formats(&get_env("VLAN_AUDIT_FORMATS", "csv,xlsx,json")),
            hostname_depth: get_env("VLAN_AUDIT_HOSTNAME_DEPTH", "0")
                .parse()
                .unwrap_or(0),
            strict: parse_bool(&get_env("VLAN_AUDIT_STRICT", "false")),
            vlan_file: get_env("VLAN_AUDIT_VLAN_FILE", "show_vlan.json"),
            svi_file: get_env("VLAN_AUDIT_SVI_FILE", "show_ip_interface_brief_vrf_all.json"),
            firewall_file: get_env("VLAN_AUDIT_FIREWALL_FILE", "show_interface_all.json"),
        }
    }

    /// Command line flags take precedence over the environment
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.configs_dir {
            self.configs_dir = dir.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(path) = &cli.topology {
            self.topology_path = Some(path.clone());
        }
        if !cli.formats.is_empty() {
            self.formats = dedup_formats(cli.formats.iter().copied());
        }
        if let Some(depth) = cli.hostname_depth {
            self.hostname_depth = depth;
        }
        if cli.strict {
            self.strict = true;
        }
        self
    }

    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Parse a comma separated format list. Unknown entries are ignored with a
/// warning; an empty result falls back to csv + xlsx.
fn parse_formats(value: &str) -> Vec<OutputFormat> {
    let parsed = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<OutputFormat>() {
            Ok(f) => Some(f),
            Err(e) => {
                tracing::warn!("Ignoring output format: {}", e);
                None
            }
        });
    let formats = dedup_formats(parsed);
    if formats.is_empty() {
        vec![OutputFormat::Csv, OutputFormat::Xlsx]
    } else {
        formats
    }
}

fn dedup_formats(formats: impl Iterator<Item = OutputFormat>) -> Vec<OutputFormat> {
    let mut out = Vec::new();
    for f in formats {
        if !out.contains(&f) {
            out.push(f);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_formats() {
        assert_eq!(
            parse_formats("csv, xlsx,json"),
            vec![OutputFormat::Csv, OutputFormat::Xlsx, OutputFormat::Json]
        );
        assert_eq!(parse_formats("JSON,json"), vec![OutputFormat::Json]);
        assert_eq!(parse_formats("pdf"), vec![OutputFormat::Csv, OutputFormat::Xlsx]);
        assert_eq!(parse_formats(""), vec![OutputFormat::Csv, OutputFormat::Xlsx]);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" YES "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_cli_overrides() {
        let base = Config {
            configs_dir: PathBuf::from("configs"),
            output_dir: PathBuf::from("outputs"),
            topology_path: None,
            formats: vec![OutputFormat::Csv],
            hostname_depth: 0,
            strict: false,
            vlan_file: "show_vlan.json".to_string(),
            svi_file: "show_ip_interface_brief_vrf_all.json".to_string(),
            firewall_file: "show_interface_all.json".to_string(),
        };
        let cli = Cli::parse_from([
            "vlan-audit",
            "zones",
            "--configs-dir",
            "/data/dumps",
            "--format",
            "json",
            "--hostname-depth",
            "1",
            "--strict",
        ]);
        let cfg = base.with_cli(&cli);
        assert_eq!(cfg.configs_dir, PathBuf::from("/data/dumps"));
        assert_eq!(cfg.output_dir, PathBuf::from("outputs"));
        assert_eq!(cfg.formats, vec![OutputFormat::Json]);
        assert_eq!(cfg.hostname_depth, 1);
        assert!(cfg.strict);
        assert!(cfg.wants(OutputFormat::Json));
        assert!(!cfg.wants(OutputFormat::Csv));
    }
}
