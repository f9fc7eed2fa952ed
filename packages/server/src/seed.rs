use common::CatalogKind;
use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{asset, catalog_item, category};
use crate::services::categories::ensure_fallback;

/// Make sure every catalog family has its fallback category.
pub async fn seed_fallback_categories(db: &DatabaseConnection) -> Result<(), DbErr> {
    for kind in [CatalogKind::Bundle, CatalogKind::Design] {
        ensure_fallback(db, kind).await?;
    }
    info!("Ensured fallback categories exist");
    Ok(())
}

/// Ensure required database indexes exist.
///
/// Schema-sync doesn't create composite indexes, so they are created
/// manually on startup. The `(kind, slug)` unique index backs the
/// `ON CONFLICT` upsert of fallback categories and is mandatory; the
/// others only speed up lookups.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Category slugs are unique per family.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_category_kind_slug")
        .table(category::Entity)
        .col(category::Column::Kind)
        .col(category::Column::Slug)
        .to_owned();
    db.execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
        .await?;
    info!("Ensured index idx_category_kind_slug exists");

    // Owned asset lookups: WHERE kind = ? AND owner_id = ?
    optional_index(
        db,
        "idx_asset_kind_owner",
        Index::create()
            .if_not_exists()
            .name("idx_asset_kind_owner")
            .table(asset::Entity)
            .col(asset::Column::Kind)
            .col(asset::Column::OwnerId)
            .to_owned(),
    )
    .await;

    // Public listings: WHERE kind = ? AND is_active ORDER BY sort_order
    optional_index(
        db,
        "idx_catalog_item_kind_sort",
        Index::create()
            .if_not_exists()
            .name("idx_catalog_item_kind_sort")
            .table(catalog_item::Entity)
            .col(catalog_item::Column::Kind)
            .col(catalog_item::Column::SortOrder)
            .to_owned(),
    )
    .await;

    Ok(())
}

async fn optional_index(db: &DatabaseConnection, name: &str, stmt: IndexCreateStatement) {
    match db
        .execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
        .await
    {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
