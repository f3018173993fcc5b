use crate::domain::model::{
    ApplyingInformation, CreationInformation, LayoutPolicy, ProvisioningTemplate, Web,
    WebProperty, WebPropertyValues,
};
use crate::domain::token::TokenParser;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Access to one remote site.
#[async_trait]
pub trait SiteClient: Send + Sync {
    fn site_url(&self) -> &str;

    async fn load_web_properties(&self, properties: &[WebProperty]) -> Result<WebPropertyValues>;

    /// Completes only once the remote call has finished (or failed).
    async fn execute_post(&self, relative_url: &str, body: serde_json::Value) -> Result<()>;
}

pub trait TemplateStore: Send + Sync {
    fn load_template(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<ProvisioningTemplate>> + Send;
    fn save_template(
        &self,
        name: &str,
        template: &ProvisioningTemplate,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn site_url(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn layout_policy(&self) -> LayoutPolicy;
    fn template_directory(&self) -> &str;
}

/// One slice of site configuration that can be extracted into a template and
/// provisioned back onto a site.
#[async_trait]
pub trait ObjectHandler: Send + Sync {
    fn name(&self) -> &str;

    fn internal_name(&self) -> &str;

    async fn extract_objects(
        &self,
        web: &mut Web,
        template: ProvisioningTemplate,
        creation_info: &CreationInformation,
    ) -> Result<ProvisioningTemplate>;

    async fn provision_objects(
        &self,
        web: &mut Web,
        template: &ProvisioningTemplate,
        parser: TokenParser,
        applying_info: &ApplyingInformation,
    ) -> Result<TokenParser>;

    fn will_extract(
        &self,
        web: &Web,
        template: &ProvisioningTemplate,
        creation_info: &CreationInformation,
    ) -> bool;

    fn will_provision(
        &self,
        web: &Web,
        template: &ProvisioningTemplate,
        applying_info: &ApplyingInformation,
    ) -> bool;
}
