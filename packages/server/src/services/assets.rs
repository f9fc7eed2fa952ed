//! Uploaded-file lifecycle: storage object plus database row.
//!
//! Creation uploads first and inserts second; when the insert fails the new
//! object is removed again. Deletion removes the row first and the object
//! second. Object removal never fails a request: a failure is logged and the
//! orphan sweep picks the object up later.

use std::collections::BTreeMap;

use chrono::Utc;
use common::config::BucketNames;
use common::storage::{BlobStore, parse_public_url};
use common::{AssetKind, CatalogKind, HeroMediaKind, HeroSlot};
use sea_orm::prelude::Expr;
use sea_orm::*;
use sea_orm::sea_query::LockType;
use serde_json::Value;
use tracing::{info, warn};

use crate::entity::{asset, catalog_item, hero_media};
use crate::error::AppError;
use crate::models::asset::{AssetListQuery, AssetTarget, RemoveAssetResponse, UpdateAssetRequest};
use crate::models::shared::{clean_strings, optional_text, validate_optional_position};
use crate::state::AppState;
use crate::utils::multipart::UploadedFile;
use crate::utils::storage_path::{asset_prefix, hero_prefix, object_path, thumbnail_prefix};

pub const MAX_CAPTION_LEN: usize = 500;
pub const MAX_TAGS: usize = 32;

/// Where an object was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub path: String,
    pub url: String,
}

/// Everything needed to create an asset row.
#[derive(Debug)]
pub struct NewAsset {
    pub kind: AssetKind,
    pub owner_id: Option<i32>,
    pub file: UploadedFile,
    pub caption: Option<String>,
    pub tags: Vec<String>,
    pub sort_order: Option<i32>,
    pub created_by: String,
}

/// Everything needed to create a hero media row.
#[derive(Debug)]
pub struct NewHeroMedia {
    pub slot: HeroSlot,
    pub label: Option<String>,
    pub is_default: bool,
    pub file: UploadedFile,
}

/// Asset kinds owned by catalog items of `kind`.
pub fn owned_kinds(kind: CatalogKind) -> Vec<AssetKind> {
    AssetKind::ALL
        .iter()
        .copied()
        .filter(|k| k.owner() == Some(kind))
        .collect()
}

pub async fn find_catalog_item<C: ConnectionTrait>(
    conn: &C,
    kind: CatalogKind,
    id: i32,
) -> Result<catalog_item::Model, AppError> {
    catalog_item::Entity::find_by_id(id)
        .filter(catalog_item::Column::Kind.eq(kind))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", capitalized(kind))))
}

fn capitalized(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Bundle => "Bundle",
        CatalogKind::Design => "Design",
    }
}

pub struct AssetService<'a> {
    db: &'a DatabaseConnection,
    store: &'a dyn BlobStore,
    buckets: &'a BucketNames,
}

impl<'a> AssetService<'a> {
    pub fn new(db: &'a DatabaseConnection, store: &'a dyn BlobStore, buckets: &'a BucketNames) -> Self {
        Self { db, store, buckets }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.db, state.blob_store.as_ref(), &state.config.storage.buckets)
    }

    /// Upload `file` under `prefix`. Never overwrites an existing object.
    pub async fn store_object(
        &self,
        bucket: &str,
        prefix: &str,
        file: &UploadedFile,
    ) -> Result<StoredObject, AppError> {
        let path = object_path(prefix, &file.filename);
        self.store
            .upload(bucket, &path, &file.data, &file.content_type)
            .await?;
        Ok(StoredObject {
            url: self.store.public_url(bucket, &path),
            bucket: bucket.to_string(),
            path,
        })
    }

    /// Remove objects, logging instead of failing.
    pub async fn discard_objects(&self, bucket: &str, paths: Vec<String>) {
        if paths.is_empty() {
            return;
        }
        if let Err(e) = self.store.remove(bucket, &paths).await {
            warn!(bucket = %bucket, paths = ?paths, error = %e, "Failed to remove storage objects");
        }
    }

    async fn discard(&self, location: Option<(String, String)>) {
        if let Some((bucket, path)) = location {
            self.discard_objects(&bucket, vec![path]).await;
        }
    }

    /// Bucket and path of an asset's object: the stored path when present,
    /// otherwise parsed from the public URL.
    pub fn asset_location(&self, row: &asset::Model) -> Option<(String, String)> {
        match &row.storage_path {
            Some(path) => {
                let bucket = row
                    .bucket
                    .clone()
                    .unwrap_or_else(|| self.buckets.for_asset(row.kind).to_string());
                Some((bucket, path.clone()))
            }
            None => parse_public_url(&row.url),
        }
    }

    fn thumbnail_location(&self, item: &catalog_item::Model) -> Option<(String, String)> {
        match (&item.thumb_storage_path, &item.thumb_url) {
            (Some(path), _) => Some((self.buckets.thumbs.clone(), path.clone())),
            (None, Some(url)) => parse_public_url(url),
            (None, None) => None,
        }
    }

    fn hero_location(&self, item: &hero_media::Model) -> Option<(String, String)> {
        match &item.storage_path {
            Some(path) => Some((self.buckets.hero.clone(), path.clone())),
            None => parse_public_url(&item.url),
        }
    }

    async fn check_owner(&self, kind: AssetKind, owner_id: Option<i32>) -> Result<(), AppError> {
        match (kind.owner(), owner_id) {
            (Some(catalog), Some(id)) => {
                find_catalog_item(self.db, catalog, id).await?;
                Ok(())
            }
            (Some(_), None) => Err(AppError::Validation(format!(
                "owner_id is required for {kind} assets"
            ))),
            (None, Some(_)) => Err(AppError::Validation(format!(
                "{kind} assets cannot have an owner"
            ))),
            (None, None) => Ok(()),
        }
    }

    /// Upload a file and record it.
    pub async fn create(&self, new: NewAsset) -> Result<asset::Model, AppError> {
        let caption = optional_text("caption", new.caption.as_deref(), MAX_CAPTION_LEN)?;
        let tags = clean_strings(new.tags);
        if tags.len() > MAX_TAGS {
            return Err(AppError::Validation(format!("At most {MAX_TAGS} tags are allowed")));
        }
        validate_optional_position(new.sort_order)?;
        self.check_owner(new.kind, new.owner_id).await?;

        let prefix = asset_prefix(new.kind, new.owner_id, Utc::now())
            .ok_or_else(|| AppError::Validation(format!("owner_id is required for {} assets", new.kind)))?;
        let bucket = self.buckets.for_asset(new.kind);
        let stored = self.store_object(bucket, &prefix, &new.file).await?;

        let row = asset::ActiveModel {
            kind: Set(new.kind),
            owner_id: Set(new.owner_id),
            url: Set(stored.url.clone()),
            storage_path: Set(Some(stored.path.clone())),
            bucket: Set(Some(stored.bucket.clone())),
            mime_type: Set(Some(new.file.content_type.clone())),
            filename: Set(Some(new.file.filename.clone())),
            size: Set(new.file.data.len() as i64),
            sort_order: Set(new.sort_order.unwrap_or(0)),
            caption: Set(caption),
            tags: Set(Value::from(tags)),
            created_by: Set(Some(new.created_by)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match row.insert(self.db).await {
            Ok(model) => {
                info!(id = model.id, kind = %model.kind, path = %stored.path, "Asset created");
                Ok(model)
            }
            Err(e) => {
                self.discard_objects(&stored.bucket, vec![stored.path]).await;
                Err(e.into())
            }
        }
    }

    /// Delete an asset row and its object.
    ///
    /// A missing id is a 404; a missing natural key reports `already_deleted`.
    pub async fn delete(&self, target: AssetTarget) -> Result<RemoveAssetResponse, AppError> {
        let row = match &target {
            AssetTarget::Id(id) => asset::Entity::find_by_id(*id)
                .one(self.db)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Asset {id} not found")))?,
            AssetTarget::NaturalKey { owner_id, url, kind } => {
                let mut query = asset::Entity::find().filter(asset::Column::Url.eq(url.as_str()));
                query = match owner_id {
                    Some(owner_id) => query.filter(asset::Column::OwnerId.eq(*owner_id)),
                    None => query.filter(asset::Column::OwnerId.is_null()),
                };
                if let Some(kind) = kind {
                    query = query.filter(asset::Column::Kind.eq(*kind));
                }
                match query.one(self.db).await? {
                    Some(row) => row,
                    None => {
                        return Ok(RemoveAssetResponse {
                            ok: true,
                            already_deleted: true,
                        });
                    }
                }
            }
        };

        asset::Entity::delete_by_id(row.id).exec(self.db).await?;
        self.discard(self.asset_location(&row)).await;

        info!(id = row.id, kind = %row.kind, "Asset deleted");
        Ok(RemoveAssetResponse {
            ok: true,
            already_deleted: false,
        })
    }

    /// Update caption, tags and sort order. Nothing else is mutable.
    pub async fn update(&self, id: i32, req: UpdateAssetRequest) -> Result<asset::Model, AppError> {
        let existing = asset::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {id} not found")))?;

        let mut active = existing.into_active_model();
        if let Some(caption) = req.caption {
            active.caption = Set(optional_text("caption", caption.as_deref(), MAX_CAPTION_LEN)?);
        }
        if let Some(tags) = req.tags {
            let tags = clean_strings(tags);
            if tags.len() > MAX_TAGS {
                return Err(AppError::Validation(format!("At most {MAX_TAGS} tags are allowed")));
            }
            active.tags = Set(Value::from(tags));
        }
        validate_optional_position(req.sort_order)?;
        if let Some(pos) = req.sort_order {
            active.sort_order = Set(pos);
        }
        Ok(active.update(self.db).await?)
    }

    /// Assets ordered by sort order, then id.
    pub async fn list(&self, query: &AssetListQuery) -> Result<Vec<asset::Model>, DbErr> {
        let mut select = asset::Entity::find();
        if let Some(kind) = query.kind {
            select = select.filter(asset::Column::Kind.eq(kind));
        }
        if let Some(owner_id) = query.owner_id {
            select = select.filter(asset::Column::OwnerId.eq(owner_id));
        }
        select
            .order_by_asc(asset::Column::SortOrder)
            .order_by_asc(asset::Column::Id)
            .all(self.db)
            .await
    }

    /// Assets owned by one catalog item, ordered for display.
    pub async fn list_owned(
        &self,
        kind: CatalogKind,
        owner_id: i32,
    ) -> Result<Vec<asset::Model>, DbErr> {
        asset::Entity::find()
            .filter(asset::Column::OwnerId.eq(owner_id))
            .filter(asset::Column::Kind.is_in(owned_kinds(kind)))
            .order_by_asc(asset::Column::SortOrder)
            .order_by_asc(asset::Column::Id)
            .all(self.db)
            .await
    }

    /// Replace a catalog item's thumbnail. The previous object is removed
    /// after the row points at the new one.
    pub async fn replace_thumbnail(
        &self,
        kind: CatalogKind,
        id: i32,
        file: &UploadedFile,
    ) -> Result<catalog_item::Model, AppError> {
        let item = find_catalog_item(self.db, kind, id).await?;
        let previous = self.thumbnail_location(&item);

        let stored = self
            .store_object(&self.buckets.thumbs, &thumbnail_prefix(Utc::now()), file)
            .await?;

        let mut active = item.into_active_model();
        active.thumb_url = Set(Some(stored.url.clone()));
        active.thumb_storage_path = Set(Some(stored.path.clone()));
        active.updated_at = Set(Utc::now());

        match active.update(self.db).await {
            Ok(updated) => {
                self.discard(previous).await;
                Ok(updated)
            }
            Err(e) => {
                self.discard_objects(&stored.bucket, vec![stored.path]).await;
                Err(e.into())
            }
        }
    }

    /// Delete a catalog item with its assets. Rows go in one transaction,
    /// objects are removed afterwards. Returns the number of asset rows removed.
    pub async fn delete_catalog_item(&self, kind: CatalogKind, id: i32) -> Result<u64, AppError> {
        let txn = self.db.begin().await?;
        let item = catalog_item::Entity::find_by_id(id)
            .filter(catalog_item::Column::Kind.eq(kind))
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", capitalized(kind))))?;
        let assets = asset::Entity::find()
            .filter(asset::Column::OwnerId.eq(id))
            .filter(asset::Column::Kind.is_in(owned_kinds(kind)))
            .all(&txn)
            .await?;
        let removed = asset::Entity::delete_many()
            .filter(asset::Column::OwnerId.eq(id))
            .filter(asset::Column::Kind.is_in(owned_kinds(kind)))
            .exec(&txn)
            .await?;
        catalog_item::Entity::delete_by_id(item.id).exec(&txn).await?;
        txn.commit().await?;

        let mut by_bucket: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (bucket, path) in assets
            .iter()
            .filter_map(|a| self.asset_location(a))
            .chain(self.thumbnail_location(&item))
        {
            by_bucket.entry(bucket).or_default().push(path);
        }
        for (bucket, paths) in by_bucket {
            self.discard_objects(&bucket, paths).await;
        }

        info!(kind = %kind, id, assets = removed.rows_affected, "Catalog item deleted");
        Ok(removed.rows_affected)
    }

    /// Upload a hero video or image. Marking it default clears the flag on
    /// the slot's other items.
    pub async fn create_hero_media(&self, new: NewHeroMedia) -> Result<hero_media::Model, AppError> {
        let label = optional_text("label", new.label.as_deref(), 128)?
            .unwrap_or_else(|| new.file.filename.clone());
        let stored = self
            .store_object(&self.buckets.hero, &hero_prefix(new.slot), &new.file)
            .await?;

        let inserted = async {
            let txn = self.db.begin().await?;
            if new.is_default {
                hero_media::Entity::update_many()
                    .col_expr(hero_media::Column::IsDefault, Expr::value(false))
                    .filter(hero_media::Column::Slot.eq(new.slot))
                    .exec(&txn)
                    .await?;
            }
            let model = hero_media::ActiveModel {
                slot: Set(new.slot),
                label: Set(label),
                kind: Set(HeroMediaKind::from_mime(&new.file.content_type)),
                url: Set(stored.url.clone()),
                storage_path: Set(Some(stored.path.clone())),
                mime_type: Set(Some(new.file.content_type.clone())),
                is_default: Set(new.is_default),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            txn.commit().await?;
            Ok::<_, DbErr>(model)
        }
        .await;

        match inserted {
            Ok(model) => Ok(model),
            Err(e) => {
                self.discard_objects(&stored.bucket, vec![stored.path]).await;
                Err(e.into())
            }
        }
    }

    /// Delete a hero media row and its object.
    pub async fn delete_hero_media(&self, id: i32) -> Result<(), AppError> {
        let item = hero_media::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Hero media {id} not found")))?;

        hero_media::Entity::delete_by_id(item.id).exec(self.db).await?;
        self.discard(self.hero_location(&item)).await;
        Ok(())
    }
}
