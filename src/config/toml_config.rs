use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::domain::model::{ApplyingInformation, LayoutPolicy};
use crate::utils::error::{Result, SiteHeaderError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub provisioning: ProvisioningConfig,
    #[serde(default)]
    pub template: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub url: String,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    #[serde(default)]
    pub layout_policy: LayoutPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_template_directory")]
    pub directory: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            directory: default_template_directory(),
        }
    }
}

fn default_template_directory() -> String {
    ".".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteHeaderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteHeaderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_ACCESS_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteHeaderError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn applying_information(&self) -> ApplyingInformation {
        ApplyingInformation {
            layout_policy: self.provisioning.layout_policy,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn site_url(&self) -> &str {
        &self.site.url
    }

    fn access_token(&self) -> Option<&str> {
        self.site.access_token.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.site.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn layout_policy(&self) -> LayoutPolicy {
        self.provisioning.layout_policy
    }

    fn template_directory(&self) -> &str {
        &self.template.directory
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_site_url("site.url", &self.site.url)?;

        if let Some(token) = &self.site.access_token {
            validation::validate_non_empty_string("site.access_token", token)?;
            if token.starts_with("${") {
                return Err(SiteHeaderError::MissingConfigError {
                    field: format!("environment variable for site.access_token ({})", token),
                });
            }
        }

        validation::validate_range("site.timeout_seconds", self.timeout_seconds(), 1, 600)?;
        validation::validate_path("template.directory", &self.template.directory)?;

        Ok(())
    }
}
