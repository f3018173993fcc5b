pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http::RestSiteClient;
pub use config::{cli::LocalTemplateStore, toml_config::TomlConfig};
pub use core::{engine::ProvisioningEngine, site_header::SiteHeaderHandler};
pub use domain::model::{
    ApplyingInformation, CreationInformation, LayoutPolicy, ProvisioningTemplate, Web,
};
pub use utils::error::{Result, SiteHeaderError};
