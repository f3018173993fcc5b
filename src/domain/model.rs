use crate::domain::ports::SiteClient;
use crate::utils::error::{Result, SiteHeaderError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Remote site representation
// ---------------------------------------------------------------------------

/// Header layout as stored on the remote site. Integer-coded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum HeaderLayoutType {
    None,
    Standard,
    Compact,
    Minimal,
    Extended,
    Unknown(i64),
}

impl From<i64> for HeaderLayoutType {
    fn from(value: i64) -> Self {
        match value {
            0 => HeaderLayoutType::None,
            1 => HeaderLayoutType::Standard,
            2 => HeaderLayoutType::Compact,
            3 => HeaderLayoutType::Minimal,
            4 => HeaderLayoutType::Extended,
            other => HeaderLayoutType::Unknown(other),
        }
    }
}

impl From<HeaderLayoutType> for i64 {
    fn from(value: HeaderLayoutType) -> Self {
        match value {
            HeaderLayoutType::None => 0,
            HeaderLayoutType::Standard => 1,
            HeaderLayoutType::Compact => 2,
            HeaderLayoutType::Minimal => 3,
            HeaderLayoutType::Extended => 4,
            HeaderLayoutType::Unknown(other) => other,
        }
    }
}

impl fmt::Display for HeaderLayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderLayoutType::None => write!(f, "None"),
            HeaderLayoutType::Standard => write!(f, "Standard"),
            HeaderLayoutType::Compact => write!(f, "Compact"),
            HeaderLayoutType::Minimal => write!(f, "Minimal"),
            HeaderLayoutType::Extended => write!(f, "Extended"),
            HeaderLayoutType::Unknown(n) => write!(f, "Unknown({})", n),
        }
    }
}

/// Theme variant applied to the header background on the remote site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum VariantThemeType {
    None,
    Neutral,
    Soft,
    Strong,
    Unknown(i64),
}

impl From<i64> for VariantThemeType {
    fn from(value: i64) -> Self {
        match value {
            0 => VariantThemeType::None,
            1 => VariantThemeType::Neutral,
            2 => VariantThemeType::Soft,
            3 => VariantThemeType::Strong,
            other => VariantThemeType::Unknown(other),
        }
    }
}

impl From<VariantThemeType> for i64 {
    fn from(value: VariantThemeType) -> Self {
        match value {
            VariantThemeType::None => 0,
            VariantThemeType::Neutral => 1,
            VariantThemeType::Soft => 2,
            VariantThemeType::Strong => 3,
            VariantThemeType::Unknown(other) => other,
        }
    }
}

impl fmt::Display for VariantThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantThemeType::None => write!(f, "None"),
            VariantThemeType::Neutral => write!(f, "Neutral"),
            VariantThemeType::Soft => write!(f, "Soft"),
            VariantThemeType::Strong => write!(f, "Strong"),
            VariantThemeType::Unknown(n) => write!(f, "Unknown({})", n),
        }
    }
}

/// Properties of the remote web that can be lazily loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebProperty {
    Url,
    HeaderEmphasis,
    HeaderLayout,
    MegaMenuEnabled,
}

impl WebProperty {
    /// Name used in `$select` and in the response payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            WebProperty::Url => "Url",
            WebProperty::HeaderEmphasis => "HeaderEmphasis",
            WebProperty::HeaderLayout => "HeaderLayout",
            WebProperty::MegaMenuEnabled => "MegaMenuEnabled",
        }
    }
}

/// Raw values returned by a property load; fields absent from the response stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebPropertyValues {
    pub url: Option<String>,
    pub header_emphasis: Option<VariantThemeType>,
    pub header_layout: Option<HeaderLayoutType>,
    pub mega_menu_enabled: Option<bool>,
}

impl WebPropertyValues {
    pub fn contains(&self, property: WebProperty) -> bool {
        match property {
            WebProperty::Url => self.url.is_some(),
            WebProperty::HeaderEmphasis => self.header_emphasis.is_some(),
            WebProperty::HeaderLayout => self.header_layout.is_some(),
            WebProperty::MegaMenuEnabled => self.mega_menu_enabled.is_some(),
        }
    }
}

/// Request body of the `SetChromeOptions` endpoint.
///
/// A `None` layout is left out of the body so the site keeps its current one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_layout: Option<HeaderLayoutType>,
    pub header_emphasis: VariantThemeType,
    pub mega_menu_enabled: bool,
}

/// Client-side view of a remote site.
///
/// Every property starts unloaded. Reading one that was never loaded with
/// [`Web::ensure_properties`] (or assigned locally) is an error.
pub struct Web {
    client: Arc<dyn SiteClient>,
    url: Option<String>,
    header_emphasis: Option<VariantThemeType>,
    header_layout: Option<HeaderLayoutType>,
    mega_menu_enabled: Option<bool>,
}

impl Web {
    pub fn new(client: Arc<dyn SiteClient>) -> Self {
        Self {
            client,
            url: None,
            header_emphasis: None,
            header_layout: None,
            mega_menu_enabled: None,
        }
    }

    pub fn client(&self) -> &Arc<dyn SiteClient> {
        &self.client
    }

    pub fn is_loaded(&self, property: WebProperty) -> bool {
        match property {
            WebProperty::Url => self.url.is_some(),
            WebProperty::HeaderEmphasis => self.header_emphasis.is_some(),
            WebProperty::HeaderLayout => self.header_layout.is_some(),
            WebProperty::MegaMenuEnabled => self.mega_menu_enabled.is_some(),
        }
    }

    /// Loads the requested properties that are not yet available, in one round trip.
    pub async fn ensure_properties(&mut self, properties: &[WebProperty]) -> Result<()> {
        let mut missing: Vec<WebProperty> = Vec::new();
        for property in properties {
            if !self.is_loaded(*property) && !missing.contains(property) {
                missing.push(*property);
            }
        }

        if missing.is_empty() {
            tracing::debug!("All requested web properties already loaded");
            return Ok(());
        }

        let values = self.client.load_web_properties(&missing).await?;

        // All or nothing: a partial response leaves the web as it was
        if let Some(absent) = missing.iter().find(|p| !values.contains(**p)) {
            return Err(SiteHeaderError::MissingProperty {
                property: absent.as_str().to_string(),
            });
        }

        for property in missing {
            match property {
                WebProperty::Url => self.url = values.url.clone(),
                WebProperty::HeaderEmphasis => self.header_emphasis = values.header_emphasis,
                WebProperty::HeaderLayout => self.header_layout = values.header_layout,
                WebProperty::MegaMenuEnabled => self.mega_menu_enabled = values.mega_menu_enabled,
            }
        }

        Ok(())
    }

    /// Posts a JSON body to an endpoint relative to the site URL.
    pub async fn execute_post(&self, relative_url: &str, body: serde_json::Value) -> Result<()> {
        self.client.execute_post(relative_url, body).await
    }

    pub fn url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| not_initialized(WebProperty::Url))
    }

    pub fn header_emphasis(&self) -> Result<VariantThemeType> {
        self.header_emphasis
            .ok_or_else(|| not_initialized(WebProperty::HeaderEmphasis))
    }

    pub fn header_layout(&self) -> Result<HeaderLayoutType> {
        self.header_layout
            .ok_or_else(|| not_initialized(WebProperty::HeaderLayout))
    }

    pub fn mega_menu_enabled(&self) -> Result<bool> {
        self.mega_menu_enabled
            .ok_or_else(|| not_initialized(WebProperty::MegaMenuEnabled))
    }

    pub fn set_header_emphasis(&mut self, value: VariantThemeType) {
        self.header_emphasis = Some(value);
    }

    pub fn set_header_layout(&mut self, value: HeaderLayoutType) {
        self.header_layout = Some(value);
    }

    pub fn set_mega_menu_enabled(&mut self, value: bool) {
        self.mega_menu_enabled = Some(value);
    }
}

impl fmt::Debug for Web {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Web")
            .field("site_url", &self.client.site_url())
            .field("url", &self.url)
            .field("header_emphasis", &self.header_emphasis)
            .field("header_layout", &self.header_layout)
            .field("mega_menu_enabled", &self.mega_menu_enabled)
            .finish()
    }
}

fn not_initialized(property: WebProperty) -> SiteHeaderError {
    SiteHeaderError::PropertyNotInitialized {
        property: property.as_str().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Template representation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SiteHeaderLayout {
    Compact,
    Minimal,
    Extended,
    #[default]
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SiteHeaderMenuStyle {
    #[default]
    MegaMenu,
    Cascading,
}

/// Header background emphasis as written in templates.
///
/// Template files are portable and may carry names that this site does not
/// know about; those are kept verbatim in `Unsupported` so that provisioning
/// can report them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emphasis {
    #[default]
    None,
    Neutral,
    Soft,
    Strong,
    Unsupported(String),
}

impl Emphasis {
    pub fn name(&self) -> &str {
        match self {
            Emphasis::None => "None",
            Emphasis::Neutral => "Neutral",
            Emphasis::Soft => "Soft",
            Emphasis::Strong => "Strong",
            Emphasis::Unsupported(name) => name,
        }
    }
}

impl From<String> for Emphasis {
    fn from(value: String) -> Self {
        match value.as_str() {
            "None" => Emphasis::None,
            "Neutral" => Emphasis::Neutral,
            "Soft" => Emphasis::Soft,
            "Strong" => Emphasis::Strong,
            _ => Emphasis::Unsupported(value),
        }
    }
}

impl From<Emphasis> for String {
    fn from(value: Emphasis) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteHeader {
    #[serde(default)]
    pub layout: SiteHeaderLayout,
    #[serde(default)]
    pub background_emphasis: Emphasis,
    #[serde(default)]
    pub menu_style: SiteHeaderMenuStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningTemplate {
    pub id: String,
    #[serde(default = "default_template_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<SiteHeader>,
}

fn default_template_version() -> String {
    "1.0".to_string()
}

impl ProvisioningTemplate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: default_template_version(),
            generated_at: None,
            header: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Which template layouts are pushed back to the remote site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Only Compact and Standard are written; Minimal and Extended leave the
    /// remote layout as it is.
    #[default]
    CompactAndStandard,
    /// All four layouts are written.
    All,
}

/// Options for an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationInformation {
    pub template_id: String,
}

impl Default for CreationInformation {
    fn default() -> Self {
        Self {
            template_id: "site-template".to_string(),
        }
    }
}

/// Options for a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyingInformation {
    pub layout_policy: LayoutPolicy,
}
