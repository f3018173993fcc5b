use crate::core::TemplateStore;
use crate::domain::model::ProvisioningTemplate;
use crate::utils::error::Result;
use std::path::Path;

/// Template files stored as JSON under a base directory.
#[derive(Debug, Clone)]
pub struct LocalTemplateStore {
    base_path: String,
}

impl LocalTemplateStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl TemplateStore for LocalTemplateStore {
    async fn load_template(&self, name: &str) -> Result<ProvisioningTemplate> {
        let full_path = Path::new(&self.base_path).join(name);
        tracing::debug!("Reading template from {}", full_path.display());

        let content = tokio::fs::read_to_string(full_path).await?;
        ProvisioningTemplate::from_json(&content)
    }

    async fn save_template(&self, name: &str, template: &ProvisioningTemplate) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, template.to_json()?).await?;
        Ok(full_path.display().to_string())
    }
}
