use std::collections::{HashMap, HashSet};

use chrono::Utc;
use common::CatalogKind;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use sea_orm::sea_query::LockType;
use tracing::info;

use crate::entity::category::{FALLBACK_LABEL, FALLBACK_SLUG};
use crate::entity::{catalog_item, category};
use crate::error::AppError;
use crate::models::category::{
    CategoryResponse, CategoryWithCount, CreateCategoryRequest, MAX_ICON_LEN, MAX_LABEL_LEN,
    UpdateCategoryRequest,
};
use crate::models::shared::{optional_text, required_text};
use crate::utils::slug::{slugify, unique_slug};

/// Insert the fallback category for `kind` if it is missing.
pub async fn ensure_fallback<C: ConnectionTrait>(conn: &C, kind: CatalogKind) -> Result<(), DbErr> {
    let model = category::ActiveModel {
        kind: Set(kind),
        slug: Set(FALLBACK_SLUG.to_string()),
        label: Set(FALLBACK_LABEL.to_string()),
        icon: Set(None),
        sort_order: Set(0),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = category::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([category::Column::Kind, category::Column::Slug])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn find_category<C: ConnectionTrait>(
    conn: &C,
    kind: CatalogKind,
    slug: &str,
) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find()
        .filter(category::Column::Kind.eq(kind))
        .filter(category::Column::Slug.eq(slug))
        .one(conn)
        .await
}

/// Category operations scoped to one catalog kind.
pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
    kind: CatalogKind,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection, kind: CatalogKind) -> Self {
        Self { db, kind }
    }

    /// Create a category. The slug comes from `slug` or `label` and gets a
    /// `-2`, `-3`, ... suffix when taken.
    pub async fn create(&self, req: CreateCategoryRequest) -> Result<category::Model, AppError> {
        req.validate()?;
        let label = required_text("label", &req.label, MAX_LABEL_LEN)?;
        let icon = optional_text("icon", req.icon.as_deref(), MAX_ICON_LEN)?;

        let source = req
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&label);
        let base = slugify(source);
        if base.is_empty() {
            return Err(AppError::Validation(
                "Slug must contain at least one letter or digit".into(),
            ));
        }

        let existing = category::Entity::find()
            .filter(category::Column::Kind.eq(self.kind))
            .all(self.db)
            .await?;
        let taken: HashSet<String> = existing.iter().map(|c| c.slug.clone()).collect();
        let slug = unique_slug(&base, &taken);

        let sort_order = match req.sort_order {
            Some(pos) => pos,
            None => existing
                .iter()
                .map(|c| c.sort_order)
                .max()
                .map_or(0, |max| max.saturating_add(1)),
        };

        let model = category::ActiveModel {
            kind: Set(self.kind),
            slug: Set(slug),
            label: Set(label),
            icon: Set(icon),
            sort_order: Set(sort_order),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn update(
        &self,
        slug: &str,
        req: UpdateCategoryRequest,
    ) -> Result<category::Model, AppError> {
        req.validate()?;
        let existing = find_category(self.db, self.kind, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{slug}' not found")))?;

        let mut active = existing.into_active_model();
        if let Some(label) = req.label {
            active.label = Set(required_text("label", &label, MAX_LABEL_LEN)?);
        }
        if let Some(icon) = req.icon {
            active.icon = Set(optional_text("icon", icon.as_deref(), MAX_ICON_LEN)?);
        }
        if let Some(pos) = req.sort_order {
            active.sort_order = Set(pos);
        }
        if let Some(is_active) = req.is_active {
            if slug == FALLBACK_SLUG && !is_active {
                return Err(AppError::Validation(
                    "The uncategorized category cannot be deactivated".into(),
                ));
            }
            active.is_active = Set(is_active);
        }
        Ok(active.update(self.db).await?)
    }

    /// Delete `slug`, moving its items to `reassign_to` (default
    /// `uncategorized`). Returns the number of moved items.
    ///
    /// The item move and the category delete share a transaction.
    pub async fn delete(&self, slug: &str, reassign_to: Option<&str>) -> Result<u64, AppError> {
        let slug = slug.trim();
        let target = reassign_to
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_SLUG);

        if slug == FALLBACK_SLUG {
            return Err(AppError::Validation(
                "The uncategorized category cannot be deleted".into(),
            ));
        }
        if target == slug {
            return Err(AppError::Validation(
                "Cannot reassign items to the category being deleted".into(),
            ));
        }

        let txn = self.db.begin().await?;

        let existing = category::Entity::find()
            .filter(category::Column::Kind.eq(self.kind))
            .filter(category::Column::Slug.eq(slug))
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{slug}' not found")))?;

        if target == FALLBACK_SLUG {
            ensure_fallback(&txn, self.kind).await?;
        } else {
            match find_category(&txn, self.kind, target).await? {
                None => {
                    return Err(AppError::Validation(format!(
                        "Cannot reassign to unknown category '{target}'"
                    )));
                }
                Some(found) if !found.is_active => {
                    return Err(AppError::Validation(format!(
                        "Cannot reassign to inactive category '{target}'"
                    )));
                }
                Some(_) => {}
            }
        }

        let moved = catalog_item::Entity::update_many()
            .col_expr(catalog_item::Column::CategoryId, Expr::value(target))
            .col_expr(catalog_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(catalog_item::Column::Kind.eq(self.kind))
            .filter(catalog_item::Column::CategoryId.eq(slug))
            .exec(&txn)
            .await?;

        category::Entity::delete_by_id(existing.id).exec(&txn).await?;
        txn.commit().await?;

        info!(
            kind = %self.kind,
            slug,
            target,
            reassigned = moved.rows_affected,
            "Deleted category"
        );
        Ok(moved.rows_affected)
    }

    /// All categories of the kind with their item counts, in display order.
    pub async fn list_with_counts(&self) -> Result<Vec<CategoryWithCount>, AppError> {
        let categories = category::Entity::find()
            .filter(category::Column::Kind.eq(self.kind))
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Id)
            .all(self.db);

        let counts = catalog_item::Entity::find()
            .filter(catalog_item::Column::Kind.eq(self.kind))
            .select_only()
            .column(catalog_item::Column::CategoryId)
            .column_as(catalog_item::Column::Id.count(), "item_count")
            .group_by(catalog_item::Column::CategoryId)
            .into_tuple::<(String, i64)>()
            .all(self.db);

        let (categories, counts) = tokio::try_join!(categories, counts)?;
        let counts: HashMap<String, i64> = counts.into_iter().collect();

        Ok(categories
            .into_iter()
            .map(|c| {
                let item_count = std::cmp::Ord::max(counts.get(&c.slug).copied().unwrap_or(0), 0) as u64;
                CategoryWithCount {
                    category: CategoryResponse::from(c),
                    item_count,
                }
            })
            .collect())
    }

    /// Active categories for public listing.
    pub async fn list_active(&self) -> Result<Vec<category::Model>, DbErr> {
        category::Entity::find()
            .filter(category::Column::Kind.eq(self.kind))
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Id)
            .all(self.db)
            .await
    }

    /// Check that `slug` names a category of this kind. The fallback is
    /// re-created on demand.
    pub async fn require_existing(&self, slug: &str) -> Result<(), AppError> {
        if slug == FALLBACK_SLUG {
            ensure_fallback(self.db, self.kind).await?;
            return Ok(());
        }
        match find_category(self.db, self.kind, slug).await? {
            Some(_) => Ok(()),
            None => Err(AppError::Validation(format!(
                "Unknown {} category '{slug}'",
                self.kind
            ))),
        }
    }
}
