use crate::utils::error::{Result, SiteHeaderError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteHeaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteHeaderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteHeaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Site root: the REST path, a query string or a fragment would end up in front of
/// `/_api/web` in every request.
pub fn validate_site_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_url(field_name, url_str)?;

    let invalid = |reason: &str| SiteHeaderError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(url_str).map_err(|e| invalid(&format!("Invalid URL format: {}", e)))?;

    if url
        .path_segments()
        .into_iter()
        .flatten()
        .any(|segment| segment.eq_ignore_ascii_case("_api"))
    {
        return Err(invalid("Site URL must not include the /_api REST path"));
    }
    if url.query().is_some() {
        return Err(invalid("Site URL must not carry a query string"));
    }
    if url.fragment().is_some() {
        return Err(invalid("Site URL must not carry a fragment"));
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SiteHeaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SiteHeaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteHeaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SiteHeaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
