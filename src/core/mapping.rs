//! Translation tables between remote header values and template header values.
//!
//! Every table is an exhaustive `match`, so adding a variant on either side
//! fails to compile until the table is updated.

use crate::domain::model::{
    Emphasis, HeaderLayoutType, LayoutPolicy, SiteHeaderLayout, SiteHeaderMenuStyle,
    VariantThemeType,
};
use crate::utils::error::{Result, SiteHeaderError};

/// Standard is used for `None` and for any value this crate does not know.
pub fn layout_from_remote(layout: HeaderLayoutType) -> SiteHeaderLayout {
    match layout {
        HeaderLayoutType::Compact => SiteHeaderLayout::Compact,
        HeaderLayoutType::Minimal => SiteHeaderLayout::Minimal,
        HeaderLayoutType::Extended => SiteHeaderLayout::Extended,
        HeaderLayoutType::Standard | HeaderLayoutType::None | HeaderLayoutType::Unknown(_) => {
            SiteHeaderLayout::Standard
        }
    }
}

/// `None` means the remote layout must be left as it is.
pub fn layout_to_remote(layout: SiteHeaderLayout, policy: LayoutPolicy) -> Option<HeaderLayoutType> {
    match (layout, policy) {
        (SiteHeaderLayout::Compact, _) => Some(HeaderLayoutType::Compact),
        (SiteHeaderLayout::Standard, _) => Some(HeaderLayoutType::Standard),
        (SiteHeaderLayout::Minimal, LayoutPolicy::All) => Some(HeaderLayoutType::Minimal),
        (SiteHeaderLayout::Extended, LayoutPolicy::All) => Some(HeaderLayoutType::Extended),
        (SiteHeaderLayout::Minimal | SiteHeaderLayout::Extended, LayoutPolicy::CompactAndStandard) => {
            None
        }
    }
}

pub fn menu_style_from_remote(mega_menu_enabled: bool) -> SiteHeaderMenuStyle {
    if mega_menu_enabled {
        SiteHeaderMenuStyle::MegaMenu
    } else {
        SiteHeaderMenuStyle::Cascading
    }
}

pub fn menu_style_to_remote(menu_style: SiteHeaderMenuStyle) -> bool {
    menu_style == SiteHeaderMenuStyle::MegaMenu
}

/// `None` when the remote value has no template counterpart.
pub fn emphasis_from_remote(emphasis: VariantThemeType) -> Option<Emphasis> {
    match emphasis {
        VariantThemeType::None => Some(Emphasis::None),
        VariantThemeType::Neutral => Some(Emphasis::Neutral),
        VariantThemeType::Soft => Some(Emphasis::Soft),
        VariantThemeType::Strong => Some(Emphasis::Strong),
        VariantThemeType::Unknown(_) => None,
    }
}

pub fn emphasis_to_remote(emphasis: &Emphasis) -> Result<VariantThemeType> {
    match emphasis {
        Emphasis::None => Ok(VariantThemeType::None),
        Emphasis::Neutral => Ok(VariantThemeType::Neutral),
        Emphasis::Soft => Ok(VariantThemeType::Soft),
        Emphasis::Strong => Ok(VariantThemeType::Strong),
        Emphasis::Unsupported(name) => Err(SiteHeaderError::UnsupportedEmphasis {
            name: name.clone(),
        }),
    }
}
