#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Background style of the landing page hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeKind {
    /// One of the preset gradients.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "gradient"))]
    Gradient,
    /// One of the preset solid colors.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "solid"))]
    Solid,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "custom-gradient"))]
    CustomGradient,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "custom-solid"))]
    CustomSolid,
}

impl ThemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gradient => "gradient",
            Self::Solid => "solid",
            Self::CustomGradient => "custom-gradient",
            Self::CustomSolid => "custom-solid",
        }
    }

    /// Solid kinds render a single color.
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid | Self::CustomSolid)
    }

    /// Gradient kinds need both endpoints.
    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::Gradient | Self::CustomGradient)
    }

    /// Parse a wire value, returning `None` for anything outside the four kinds.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "gradient" => Some(Self::Gradient),
            "solid" => Some(Self::Solid),
            "custom-gradient" => Some(Self::CustomGradient),
            "custom-solid" => Some(Self::CustomSolid),
            _ => None,
        }
    }
}
