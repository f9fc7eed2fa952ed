//! Orphan sweep: removes storage objects that no row references.
//!
//! Request handlers delete rows before objects and never fail on a storage
//! error, so an object can outlive its row. The sweep is what eventually
//! removes it.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use common::config::{BucketNames, StorageAppConfig};
use common::storage::{BlobStore, ObjectInfo, parse_public_url};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use tracing::{debug, error, info, warn};

use crate::entity::{asset, catalog_item, hero_media};
use crate::models::sweep::SweepReport;
use crate::state::AppState;

/// `(bucket, path)` pairs that some row points at.
pub type References = HashSet<(String, String)>;

fn reference(
    references: &mut References,
    bucket: Option<&str>,
    storage_path: Option<String>,
    url: Option<&str>,
) {
    match (bucket, storage_path) {
        (Some(bucket), Some(path)) => {
            references.insert((bucket.to_string(), path));
        }
        _ => {
            if let Some(location) = url.and_then(parse_public_url) {
                references.insert(location);
            }
        }
    }
}

/// Every object location referenced by assets, thumbnails and hero media.
pub async fn collect_references(
    db: &DatabaseConnection,
    buckets: &BucketNames,
) -> Result<References, DbErr> {
    let mut references = References::new();

    for row in asset::Entity::find().all(db).await? {
        let bucket = row
            .bucket
            .unwrap_or_else(|| buckets.for_asset(row.kind).to_string());
        reference(&mut references, Some(&bucket), row.storage_path, Some(&row.url));
    }

    for item in catalog_item::Entity::find().all(db).await? {
        reference(
            &mut references,
            Some(&buckets.thumbs),
            item.thumb_storage_path,
            item.thumb_url.as_deref(),
        );
    }

    for item in hero_media::Entity::find().all(db).await? {
        reference(&mut references, Some(&buckets.hero), item.storage_path, Some(&item.url));
    }

    Ok(references)
}

/// Objects in `bucket` that are unreferenced and older than `cutoff`.
///
/// Objects without a modification time are never selected. Returns the
/// paths to remove and the number of unreferenced objects still too young.
pub fn plan_removals(
    bucket: &str,
    objects: &[ObjectInfo],
    references: &References,
    cutoff: DateTime<Utc>,
) -> (Vec<String>, u64) {
    let mut remove = Vec::new();
    let mut recent = 0;
    for object in objects {
        if references.contains(&(bucket.to_string(), object.path.clone())) {
            continue;
        }
        match object.last_modified {
            Some(modified) if modified < cutoff => remove.push(object.path.clone()),
            _ => recent += 1,
        }
    }
    (remove, recent)
}

/// Scan every configured bucket once.
///
/// Buckets are listed before references are read, so an object uploaded
/// during the scan is either absent from the listing or inside the grace
/// period.
pub async fn run_sweep(
    db: &DatabaseConnection,
    store: &dyn BlobStore,
    storage: &StorageAppConfig,
    grace: Duration,
) -> anyhow::Result<SweepReport> {
    let cutoff = Utc::now() - chrono::Duration::from_std(grace)?;
    let buckets = storage.buckets.all();

    let mut listings = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let objects = store.list(bucket).await?;
        listings.push((bucket.to_string(), objects));
    }

    let references = collect_references(db, &storage.buckets).await?;
    let mut report = SweepReport::default();

    for (bucket, objects) in listings {
        report.buckets_scanned += 1;
        report.objects_scanned += objects.len() as u64;

        let (remove, recent) = plan_removals(&bucket, &objects, &references, cutoff);
        report.skipped_recent += recent;
        if remove.is_empty() {
            continue;
        }

        debug!(bucket = %bucket, count = remove.len(), "Removing orphaned objects");
        match store.remove(&bucket, &remove).await {
            Ok(()) => report.removed += remove.len() as u64,
            Err(e) => {
                warn!(bucket = %bucket, count = remove.len(), error = %e, "Failed to remove orphaned objects");
                report.failed += remove.len() as u64;
            }
        }
    }

    info!(
        buckets = report.buckets_scanned,
        scanned = report.objects_scanned,
        removed = report.removed,
        failed = report.failed,
        "Orphan sweep finished"
    );
    Ok(report)
}

/// Run the orphan sweep as a background task.
pub async fn run_orphan_sweeper(state: AppState) {
    let config = state.config.sweep.clone();
    let grace = Duration::from_secs(config.grace_secs);

    info!(
        interval_secs = config.interval_secs,
        grace_secs = config.grace_secs,
        "Starting orphan sweeper"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs.max(1)));

    loop {
        interval.tick().await;

        if let Err(e) = run_sweep(
            &state.db,
            state.blob_store.as_ref(),
            &state.config.storage,
            grace,
        )
        .await
        {
            error!(error = %e, "Orphan sweep failed");
        }
    }
}
