//! Tables that behave as a single logical row.
//!
//! Two write strategies exist:
//!
//! * [`update_or_insert`]: lock the most recently updated row and update it
//!   in place, or insert when the table is empty. Callers merge only the
//!   fields they were given, so unrelated fields survive.
//! * [`replace_all`]: delete every row and insert one new row, in a single
//!   transaction.
//!
//! Reads always go through [`latest`], which picks the most recently updated
//! row, so stray duplicate rows never change what readers see.

use sea_orm::*;
use sea_orm::sea_query::LockType;

use crate::entity::{hero_media_config, hero_theme, site_tagline};

/// An entity with an `updated_at` column used to pick the current row.
pub trait SingletonEntity: EntityTrait {
    fn updated_at_column() -> Self::Column;
}

impl SingletonEntity for hero_media_config::Entity {
    fn updated_at_column() -> Self::Column {
        hero_media_config::Column::UpdatedAt
    }
}

impl SingletonEntity for hero_theme::Entity {
    fn updated_at_column() -> Self::Column {
        hero_theme::Column::UpdatedAt
    }
}

impl SingletonEntity for site_tagline::Entity {
    fn updated_at_column() -> Self::Column {
        site_tagline::Column::UpdatedAt
    }
}

/// The most recently updated row, if any.
pub async fn latest<E, C>(conn: &C) -> Result<Option<E::Model>, DbErr>
where
    E: SingletonEntity,
    C: ConnectionTrait,
{
    E::find()
        .order_by_desc(E::updated_at_column())
        .one(conn)
        .await
}

/// Update the current row in place, or insert one if the table is empty.
///
/// `apply` receives the locked current row (`None` when empty) and returns
/// the active model to write. It runs inside the transaction, after the lock
/// is taken.
pub async fn update_or_insert<E, A, F>(db: &DatabaseConnection, apply: F) -> Result<E::Model, DbErr>
where
    E: SingletonEntity,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    F: FnOnce(Option<E::Model>) -> A + Send,
{
    let txn = db.begin().await?;

    let current = E::find()
        .order_by_desc(E::updated_at_column())
        .lock(LockType::Update)
        .one(&txn)
        .await?;

    let exists = current.is_some();
    let active = apply(current);
    let saved = if exists {
        active.update(&txn).await?
    } else {
        active.insert(&txn).await?
    };

    txn.commit().await?;
    Ok(saved)
}

/// Replace the table contents with exactly one row.
///
/// The delete and the insert share a transaction: a failed delete aborts
/// before inserting, and a failed insert rolls the delete back.
pub async fn replace_all<E, A>(db: &DatabaseConnection, row: A) -> Result<E::Model, DbErr>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    let txn = db.begin().await?;
    E::delete_many().exec(&txn).await?;
    let saved = row.insert(&txn).await?;
    txn.commit().await?;
    Ok(saved)
}
