use chrono::{DateTime, Utc};
use common::{AssetKind, HeroSlot};
use uuid::Uuid;

use super::filename::storage_extension;

fn day(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d").to_string()
}

/// Directory prefix for an asset of `kind`. `None` when an owned kind is
/// missing its owner.
pub fn asset_prefix(kind: AssetKind, owner_id: Option<i32>, now: DateTime<Utc>) -> Option<String> {
    let prefix = match (kind, owner_id) {
        (AssetKind::Media, _) => format!("media/{}", day(now)),
        (AssetKind::VoiceNote, _) => format!("voice/{}", day(now)),
        (AssetKind::BundleImage, Some(id)) => format!("gallery/{id}"),
        (AssetKind::BundleFile, Some(id)) => format!("files/{id}"),
        (AssetKind::DesignImage, Some(id)) => format!("designs/{id}"),
        (AssetKind::DesignFile, Some(id)) => format!("designs/{id}/files"),
        (_, None) => return None,
    };
    Some(prefix)
}

pub fn thumbnail_prefix(now: DateTime<Utc>) -> String {
    format!("thumbs/{}", day(now))
}

pub fn hero_prefix(slot: HeroSlot) -> String {
    format!("hero/{slot}")
}

/// `{prefix}/{uuid}.{ext}`. A fresh UUID per call keeps paths unique even for
/// identical filenames under the same prefix.
pub fn object_path(prefix: &str, filename: &str) -> String {
    format!("{prefix}/{}.{}", Uuid::new_v4(), storage_extension(filename))
}
