pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "site-header")]
#[command(about = "Extract a site's header settings into a template, or apply a template's header to a site")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Read the site header and write it to a template file
    Extract {
        #[arg(long, default_value = "site-header.toml")]
        config: String,

        /// File name inside the template directory; `{templateid}` and `{timestamp}` are replaced
        #[arg(long, default_value = "{templateid}.json")]
        output: String,

        #[arg(long, default_value = "site-template")]
        template_id: String,
    },
    /// Apply the header of a template file to the site
    Provision {
        #[arg(long, default_value = "site-header.toml")]
        config: String,

        /// File name inside the template directory
        #[arg(long)]
        template: String,
    },
}

#[cfg(feature = "cli")]
impl Command {
    pub fn config_path(&self) -> &str {
        match self {
            Command::Extract { config, .. } | Command::Provision { config, .. } => config,
        }
    }
}
