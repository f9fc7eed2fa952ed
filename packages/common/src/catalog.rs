#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two catalog families. Each has its own categories and items.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Print bundles (multi-part kits).
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "bundle"))]
    Bundle,
    /// Individual designs.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "design"))]
    Design,
}

impl CatalogKind {
    pub const ALL: &'static [CatalogKind] = &[Self::Bundle, Self::Design];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bundle => "bundle",
            Self::Design => "design",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bundle" => Ok(Self::Bundle),
            "design" => Ok(Self::Design),
            other => Err(format!("unknown catalog kind: {other}")),
        }
    }
}

/// Family of an uploaded asset. Determines bucket, path prefix and owner type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Standalone gallery media, no owner.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "media"))]
    Media,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "bundle_image"))]
    BundleImage,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "bundle_file"))]
    BundleFile,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "design_image"))]
    DesignImage,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "design_file"))]
    DesignFile,
    /// Voice notes pushed by the ingestion integration, no owner.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "voice_note"))]
    VoiceNote,
}

impl AssetKind {
    pub const ALL: &'static [AssetKind] = &[
        Self::Media,
        Self::BundleImage,
        Self::BundleFile,
        Self::DesignImage,
        Self::DesignFile,
        Self::VoiceNote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::BundleImage => "bundle_image",
            Self::BundleFile => "bundle_file",
            Self::DesignImage => "design_image",
            Self::DesignFile => "design_file",
            Self::VoiceNote => "voice_note",
        }
    }

    /// The catalog family that owns assets of this kind, if any.
    pub fn owner(&self) -> Option<CatalogKind> {
        match self {
            Self::BundleImage | Self::BundleFile => Some(CatalogKind::Bundle),
            Self::DesignImage | Self::DesignFile => Some(CatalogKind::Design),
            Self::Media | Self::VoiceNote => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown asset kind: {s}"))
    }
}
