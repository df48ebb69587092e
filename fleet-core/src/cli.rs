//! src/cli.rs
//! Command-line flags; values given here override the config file.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "fleet")]
#[command(version)]
#[command(about = "Terminal browser for EC2, EKS and Auto Scaling fleets")]
pub struct Cli {
    /// Cloud region (defaults to the CLI profile's region)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Named credentials profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `fleet_core=trace`
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Folds the flags into `config`. `NO_COLOR` in the environment also
    /// forces monochrome.
    pub fn apply(&self, config: &mut Config) {
        if let Some(region) = self.region.as_deref().filter(|r| !r.trim().is_empty()) {
            config.region = region.trim().to_string();
        }
        if let Some(profile) = self.profile.as_deref().filter(|p| !p.trim().is_empty()) {
            config.profile = profile.trim().to_string();
        }
        if self.no_color || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.no_color = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
