use crate::core::site_header::SiteHeaderHandler;
use crate::core::ObjectHandler;
use crate::domain::model::{ApplyingInformation, CreationInformation, ProvisioningTemplate, Web};
use crate::domain::token::TokenParser;
use crate::utils::error::Result;

/// 依序執行所有 handler 的擷取與套用
pub struct ProvisioningEngine {
    handlers: Vec<Box<dyn ObjectHandler>>,
}

impl ProvisioningEngine {
    pub fn new(handlers: Vec<Box<dyn ObjectHandler>>) -> Self {
        Self { handlers }
    }

    pub fn with_default_handlers() -> Self {
        Self::new(vec![Box::new(SiteHeaderHandler::new())])
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.internal_name()).collect()
    }

    /// 從網站擷取設定產生範本
    pub async fn extract(
        &self,
        web: &mut Web,
        creation_info: &CreationInformation,
    ) -> Result<ProvisioningTemplate> {
        tracing::info!("🚀 Extracting template '{}'", creation_info.template_id);

        let mut template = ProvisioningTemplate::new(creation_info.template_id.clone());
        template.generated_at = Some(chrono::Utc::now());

        for handler in &self.handlers {
            if !handler.will_extract(web, &template, creation_info) {
                tracing::debug!("Skipping extraction for {}", handler.name());
                continue;
            }

            tracing::info!("📥 Extracting {}", handler.name());
            template = handler.extract_objects(web, template, creation_info).await?;
        }

        tracing::info!("✅ Extraction finished");
        Ok(template)
    }

    /// 將範本套用到網站，回傳套用後的 token parser
    pub async fn provision(
        &self,
        web: &mut Web,
        template: &ProvisioningTemplate,
        applying_info: &ApplyingInformation,
    ) -> Result<TokenParser> {
        tracing::info!("🚀 Applying template '{}'", template.id);

        let mut parser = TokenParser::new()
            .with_token("site", web.client().site_url())
            .with_token("templateid", &template.id);

        for handler in &self.handlers {
            if !handler.will_provision(web, template, applying_info) {
                tracing::debug!("Skipping provisioning for {}", handler.name());
                continue;
            }

            tracing::info!("📤 Provisioning {}", handler.name());
            parser = handler
                .provision_objects(web, template, parser, applying_info)
                .await?;
        }

        tracing::info!("✅ Template applied");
        Ok(parser)
    }
}

impl Default for ProvisioningEngine {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}
