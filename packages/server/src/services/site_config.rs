//! Hero selection, theme, tagline and key/value settings.

use chrono::{DateTime, Utc};
use common::{HeroMediaKind, HeroSlot};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use serde_json::Value;

use super::singleton;
use crate::entity::{hero_media, hero_media_config, hero_theme, site_setting, site_tagline};
use crate::error::AppError;
use crate::models::hero::{HeroSelectionPatch, ResolvedHeroMedia};
use crate::models::site::ValidTheme;

/// Shown in the main slot when no hero media exists.
pub const MAIN_FALLBACK_URL: &str = "/media/hero-main.mp4";
/// Shown in the side slot when no hero media exists.
pub const SIDE_FALLBACK_URL: &str = "/media/hero-side.jpg";

pub fn fallback_hero(slot: HeroSlot) -> ResolvedHeroMedia {
    match slot {
        HeroSlot::Main => ResolvedHeroMedia {
            id: None,
            slot,
            kind: HeroMediaKind::Video,
            url: MAIN_FALLBACK_URL.into(),
            label: "Printers at work".into(),
        },
        HeroSlot::Side => ResolvedHeroMedia {
            id: None,
            slot,
            kind: HeroMediaKind::Image,
            url: SIDE_FALLBACK_URL.into(),
            label: "Finished prints".into(),
        },
    }
}

/// Pick what a slot shows: the selected item, else the slot's default item,
/// else the slot's lowest-id item, else the built-in fallback.
pub fn resolve_hero(
    slot: HeroSlot,
    selected_id: Option<i32>,
    items: &[hero_media::Model],
) -> ResolvedHeroMedia {
    let in_slot = || items.iter().filter(move |m| m.slot == slot);

    selected_id
        .and_then(|id| in_slot().find(|m| m.id == id))
        .or_else(|| in_slot().filter(|m| m.is_default).min_by_key(|m| m.id))
        .or_else(|| in_slot().min_by_key(|m| m.id))
        .map(ResolvedHeroMedia::from)
        .unwrap_or_else(|| fallback_hero(slot))
}

/// Apply a selection patch to the current config row. Slots the patch does
/// not mention keep their current selection.
pub fn merge_selection(
    current: Option<hero_media_config::Model>,
    patch: HeroSelectionPatch,
    user_id: &str,
    now: DateTime<Utc>,
) -> hero_media_config::ActiveModel {
    match current {
        Some(model) => {
            let mut active = model.into_active_model();
            if let Some(id) = patch.main {
                active.selected_main_id = Set(Some(id));
            }
            if let Some(id) = patch.side {
                active.selected_side_id = Set(Some(id));
            }
            active.updated_by = Set(Some(user_id.to_string()));
            active.updated_at = Set(now);
            active
        }
        None => hero_media_config::ActiveModel {
            id: Set(hero_media_config::SINGLETON_ID),
            selected_main_id: Set(patch.main),
            selected_side_id: Set(patch.side),
            updated_by: Set(Some(user_id.to_string())),
            updated_at: Set(now),
        },
    }
}

pub async fn current_hero_config<C: ConnectionTrait>(
    conn: &C,
) -> Result<Option<hero_media_config::Model>, DbErr> {
    singleton::latest::<hero_media_config::Entity, _>(conn).await
}

/// Record a hero selection. Every referenced item must exist in its slot.
pub async fn select_hero(
    db: &DatabaseConnection,
    patch: HeroSelectionPatch,
    user_id: &str,
) -> Result<hero_media_config::Model, AppError> {
    for (slot, id) in patch.entries() {
        match hero_media::Entity::find_by_id(id).one(db).await? {
            Some(item) if item.slot == slot => {}
            Some(item) => {
                return Err(AppError::Validation(format!(
                    "Hero media {id} belongs to the {} slot, not {slot}",
                    item.slot
                )));
            }
            None => {
                return Err(AppError::Validation(format!(
                    "Hero media {id} does not exist"
                )));
            }
        }
    }

    let now = Utc::now();
    let saved = singleton::update_or_insert::<hero_media_config::Entity, _, _>(db, |current| {
        merge_selection(current, patch, user_id, now)
    })
    .await?;
    Ok(saved)
}

/// Hero media of both slots plus the current selection, resolved for display.
pub async fn resolved_hero<C: ConnectionTrait>(
    conn: &C,
) -> Result<(ResolvedHeroMedia, ResolvedHeroMedia), DbErr> {
    let items = hero_media::Entity::find()
        .order_by_asc(hero_media::Column::Id)
        .all(conn)
        .await?;
    let config = current_hero_config(conn).await?;
    let main_id = config.as_ref().and_then(|c| c.selected_main_id);
    let side_id = config.as_ref().and_then(|c| c.selected_side_id);
    Ok((
        resolve_hero(HeroSlot::Main, main_id, &items),
        resolve_hero(HeroSlot::Side, side_id, &items),
    ))
}

pub async fn current_theme<C: ConnectionTrait>(conn: &C) -> Result<Option<hero_theme::Model>, DbErr> {
    singleton::latest::<hero_theme::Entity, _>(conn).await
}

/// Replace the theme with a validated one.
pub async fn save_theme(
    db: &DatabaseConnection,
    theme: ValidTheme,
    user_id: &str,
) -> Result<hero_theme::Model, DbErr> {
    let row = hero_theme::ActiveModel {
        kind: Set(theme.kind),
        solid_color: Set(theme.solid_color),
        from_color: Set(theme.from),
        to_color: Set(theme.to),
        updated_by: Set(Some(user_id.to_string())),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };
    singleton::replace_all::<hero_theme::Entity, _>(db, row).await
}

pub async fn current_tagline<C: ConnectionTrait>(
    conn: &C,
) -> Result<Option<site_tagline::Model>, DbErr> {
    singleton::latest::<site_tagline::Entity, _>(conn).await
}

pub async fn save_tagline(
    db: &DatabaseConnection,
    tagline: String,
    user_id: &str,
) -> Result<site_tagline::Model, DbErr> {
    let now = Utc::now();
    singleton::update_or_insert::<site_tagline::Entity, _, _>(db, |current| match current {
        Some(model) => {
            let mut active = model.into_active_model();
            active.tagline = Set(tagline);
            active.updated_by = Set(Some(user_id.to_string()));
            active.updated_at = Set(now);
            active
        }
        None => site_tagline::ActiveModel {
            tagline: Set(tagline),
            updated_by: Set(Some(user_id.to_string())),
            updated_at: Set(now),
            ..Default::default()
        },
    })
    .await
}

pub async fn get_setting<C: ConnectionTrait>(
    conn: &C,
    key: &str,
) -> Result<Option<site_setting::Model>, DbErr> {
    site_setting::Entity::find_by_id(key.to_string()).one(conn).await
}

/// Insert or overwrite the value stored under `key`.
pub async fn save_setting<C: ConnectionTrait>(
    conn: &C,
    key: &str,
    value: Value,
    user_id: &str,
) -> Result<site_setting::Model, DbErr> {
    let row = site_setting::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_by: Set(Some(user_id.to_string())),
        updated_at: Set(Utc::now()),
    };

    site_setting::Entity::insert(row)
        .on_conflict(
            OnConflict::column(site_setting::Column::Key)
                .update_columns([
                    site_setting::Column::Value,
                    site_setting::Column::UpdatedBy,
                    site_setting::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await
}
