use crate::core::mapping::{
    emphasis_from_remote, emphasis_to_remote, layout_from_remote, layout_to_remote,
    menu_style_from_remote, menu_style_to_remote,
};
use crate::domain::model::{
    ApplyingInformation, ChromeOptions, CreationInformation, ProvisioningTemplate, SiteHeader,
    Web, WebProperty,
};
use crate::domain::ports::ObjectHandler;
use crate::domain::token::TokenParser;
use crate::utils::error::{Result, SiteHeaderError};
use crate::utils::monitor::MonitoredScope;
use async_trait::async_trait;
use tracing::Instrument;

pub const SET_CHROME_OPTIONS_ENDPOINT: &str = "/_api/web/SetChromeOptions";

/// Header layout, header emphasis and menu style of a site.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteHeaderHandler;

impl SiteHeaderHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ObjectHandler for SiteHeaderHandler {
    fn name(&self) -> &str {
        "Site Header"
    }

    fn internal_name(&self) -> &str {
        "SiteHeader"
    }

    async fn extract_objects(
        &self,
        web: &mut Web,
        mut template: ProvisioningTemplate,
        _creation_info: &CreationInformation,
    ) -> Result<ProvisioningTemplate> {
        let scope = MonitoredScope::new(self.name());

        let result = async {
            web.ensure_properties(&[
                WebProperty::HeaderEmphasis,
                WebProperty::HeaderLayout,
                WebProperty::MegaMenuEnabled,
            ])
            .await?;

            let remote_layout = web.header_layout()?;
            let mut header = SiteHeader {
                layout: layout_from_remote(remote_layout),
                menu_style: menu_style_from_remote(web.mega_menu_enabled()?),
                ..Default::default()
            };

            let remote_emphasis = web.header_emphasis()?;
            match emphasis_from_remote(remote_emphasis) {
                Some(emphasis) => header.background_emphasis = emphasis,
                None => scope.log_debug(&format!(
                    "Header emphasis {} has no template counterpart, keeping {}",
                    remote_emphasis, header.background_emphasis
                )),
            }

            scope.log_debug(&format!(
                "Extracted header: layout {:?} (remote {}), emphasis {}, menu {:?}",
                header.layout, remote_layout, header.background_emphasis, header.menu_style
            ));

            template.header = Some(header);
            Ok::<_, SiteHeaderError>(template)
        }
        .instrument(scope.span().clone())
        .await;

        scope.complete();
        result
    }

    async fn provision_objects(
        &self,
        web: &mut Web,
        template: &ProvisioningTemplate,
        parser: TokenParser,
        applying_info: &ApplyingInformation,
    ) -> Result<TokenParser> {
        let scope = MonitoredScope::new(self.name());

        let result = async {
            web.ensure_properties(&[WebProperty::Url]).await?;

            let Some(header) = &template.header else {
                scope.log_debug("Template has no header settings");
                return Ok(parser);
            };

            // Resolved before touching the web so a bad template leaves it as loaded
            let emphasis = emphasis_to_remote(&header.background_emphasis)?;

            let layout = layout_to_remote(header.layout, applying_info.layout_policy);
            match layout {
                Some(layout) => web.set_header_layout(layout),
                None => scope.log_info(&format!(
                    "Layout {:?} is not applied under policy {:?}, remote layout left unchanged",
                    header.layout, applying_info.layout_policy
                )),
            }
            web.set_header_emphasis(emphasis);
            web.set_mega_menu_enabled(menu_style_to_remote(header.menu_style));

            let options = ChromeOptions {
                header_layout: layout,
                header_emphasis: web.header_emphasis()?,
                mega_menu_enabled: web.mega_menu_enabled()?,
            };

            scope.log_debug(&format!("Applying chrome options to {}", web.url()?));
            web.execute_post(SET_CHROME_OPTIONS_ENDPOINT, serde_json::to_value(&options)?)
                .await?;
            scope.log_info("Header settings applied");

            Ok::<_, SiteHeaderError>(parser)
        }
        .instrument(scope.span().clone())
        .await;

        scope.complete();
        result
    }

    fn will_extract(
        &self,
        _web: &Web,
        _template: &ProvisioningTemplate,
        _creation_info: &CreationInformation,
    ) -> bool {
        true
    }

    fn will_provision(
        &self,
        _web: &Web,
        template: &ProvisioningTemplate,
        _applying_info: &ApplyingInformation,
    ) -> bool {
        template.header.is_some()
    }
}
