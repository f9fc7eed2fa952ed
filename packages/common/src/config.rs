use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::AssetKind;

/// Which blob store implementation backs uploads.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local directory tree, one sub-directory per bucket.
    #[default]
    Filesystem,
    /// S3-compatible object storage. Requires the `object-storage` feature.
    S3,
}

/// One bucket name per asset family.
#[derive(Debug, Deserialize, Clone)]
pub struct BucketNames {
    #[serde(default = "default_media_bucket")]
    pub media: String,
    #[serde(default = "default_bundles_bucket")]
    pub bundles: String,
    #[serde(default = "default_designs_bucket")]
    pub designs: String,
    #[serde(default = "default_thumbs_bucket")]
    pub thumbs: String,
    #[serde(default = "default_hero_bucket")]
    pub hero: String,
    #[serde(default = "default_voice_bucket")]
    pub voice: String,
}

fn default_media_bucket() -> String {
    "media".into()
}
fn default_bundles_bucket() -> String {
    "bundles".into()
}
fn default_designs_bucket() -> String {
    "designs".into()
}
fn default_thumbs_bucket() -> String {
    "thumbs".into()
}
fn default_hero_bucket() -> String {
    "hero".into()
}
fn default_voice_bucket() -> String {
    "voice-notes".into()
}

impl Default for BucketNames {
    fn default() -> Self {
        Self {
            media: default_media_bucket(),
            bundles: default_bundles_bucket(),
            designs: default_designs_bucket(),
            thumbs: default_thumbs_bucket(),
            hero: default_hero_bucket(),
            voice: default_voice_bucket(),
        }
    }
}

impl BucketNames {
    /// Bucket that stores assets of the given kind.
    pub fn for_asset(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Media => &self.media,
            AssetKind::BundleImage | AssetKind::BundleFile => &self.bundles,
            AssetKind::DesignImage | AssetKind::DesignFile => &self.designs,
            AssetKind::VoiceNote => &self.voice,
        }
    }

    /// Every configured bucket, deduplicated, in declaration order.
    pub fn all(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for name in [
            &self.media,
            &self.bundles,
            &self.designs,
            &self.thumbs,
            &self.hero,
            &self.voice,
        ] {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        out
    }
}

/// Connection settings for the S3 backend.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub endpoint: String,
    #[serde(default = "default_s3_region")]
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Use `endpoint/bucket/key` addressing (MinIO and most self-hosted stores).
    #[serde(default = "default_path_style")]
    pub path_style: bool,
}

fn default_s3_region() -> String {
    "us-east-1".into()
}
fn default_path_style() -> bool {
    true
}

/// App-level blob storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageAppConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Root directory of the filesystem backend. Default: "./data/storage".
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
    /// Base of every public object URL; objects resolve to
    /// `{public_base_url}/object/public/{bucket}/{path}`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Largest accepted upload in bytes. Default: 50 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
    #[serde(default)]
    pub buckets: BucketNames,
    pub s3: Option<S3Config>,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data/storage")
}
fn default_public_base_url() -> String {
    "http://127.0.0.1:3000/storage/v1".into()
}
fn default_max_upload_size() -> u64 {
    50 * 1024 * 1024
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: default_storage_root(),
            public_base_url: default_public_base_url(),
            max_upload_size: default_max_upload_size(),
            buckets: BucketNames::default(),
            s3: None,
        }
    }
}
