pub mod engine;
pub mod mapping;
pub mod site_header;

pub use crate::domain::model::{ProvisioningTemplate, SiteHeader, Web};
pub use crate::domain::ports::{ConfigProvider, ObjectHandler, SiteClient, TemplateStore};
pub use crate::domain::token::TokenParser;
pub use crate::utils::error::Result;
