use chrono::{DateTime, Utc};
use common::{HeroMediaKind, HeroSlot};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{hero_media, hero_media_config};
use crate::error::AppError;

#[derive(Serialize, ToSchema, Debug)]
pub struct HeroMediaResponse {
    pub id: i32,
    pub slot: HeroSlot,
    pub label: String,
    pub kind: HeroMediaKind,
    pub url: String,
    pub mime_type: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl From<hero_media::Model> for HeroMediaResponse {
    fn from(model: hero_media::Model) -> Self {
        Self {
            id: model.id,
            slot: model.slot,
            label: model.label,
            kind: model.kind,
            url: model.url,
            mime_type: model.mime_type,
            is_default: model.is_default,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HeroMediaListResponse {
    pub items: Vec<HeroMediaResponse>,
    /// Current selection, if one was ever saved.
    pub config: Option<HeroConfigResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct HeroMediaCreatedResponse {
    pub item: HeroMediaResponse,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct HeroConfigResponse {
    pub selected_main_id: Option<i32>,
    pub selected_side_id: Option<i32>,
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<hero_media_config::Model> for HeroConfigResponse {
    fn from(model: hero_media_config::Model) -> Self {
        Self {
            selected_main_id: model.selected_main_id,
            selected_side_id: model.selected_side_id,
            updated_by: model.updated_by,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SelectHeroResponse {
    pub ok: bool,
    pub config: HeroConfigResponse,
}

/// Body of `POST /config/select`.
///
/// The canonical shape is `{slot, item_id}`. Older dashboard builds send
/// `{itemId}`, `{mainId}` / `{selected_main_id}` or `{sideId}` /
/// `{selected_side_id}`; these are folded into the same patch.
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct SelectHeroRequest {
    pub slot: Option<HeroSlot>,
    #[serde(alias = "itemId")]
    pub item_id: Option<i32>,
    #[serde(alias = "mainId", alias = "selected_main_id")]
    pub main_id: Option<i32>,
    #[serde(alias = "sideId", alias = "selected_side_id")]
    pub side_id: Option<i32>,
}

/// Explicitly provided selection fields. `None` leaves a slot unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeroSelectionPatch {
    pub main: Option<i32>,
    pub side: Option<i32>,
}

impl HeroSelectionPatch {
    /// Slot/id pairs that this patch sets.
    pub fn entries(&self) -> Vec<(HeroSlot, i32)> {
        let mut out = Vec::with_capacity(2);
        if let Some(id) = self.main {
            out.push((HeroSlot::Main, id));
        }
        if let Some(id) = self.side {
            out.push((HeroSlot::Side, id));
        }
        out
    }
}

impl SelectHeroRequest {
    pub fn into_patch(self) -> Result<HeroSelectionPatch, AppError> {
        let mut patch = HeroSelectionPatch {
            main: self.main_id,
            side: self.side_id,
        };

        match (self.slot, self.item_id) {
            (Some(HeroSlot::Main), Some(id)) => patch.main = Some(id),
            (Some(HeroSlot::Side), Some(id)) => patch.side = Some(id),
            (None, Some(_)) => {
                return Err(AppError::Validation("'item_id' requires 'slot'".into()));
            }
            (Some(_), None) => {
                return Err(AppError::Validation("'slot' requires 'item_id'".into()));
            }
            (None, None) => {}
        }

        if patch.main.is_none() && patch.side.is_none() {
            return Err(AppError::Validation(
                "Provide 'slot' and 'item_id' to select hero media".into(),
            ));
        }
        Ok(patch)
    }
}

/// What the landing page shows in one slot.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeroMedia {
    /// `None` for the built-in fallback.
    pub id: Option<i32>,
    pub slot: HeroSlot,
    pub kind: HeroMediaKind,
    pub url: String,
    pub label: String,
}

impl From<&hero_media::Model> for ResolvedHeroMedia {
    fn from(model: &hero_media::Model) -> Self {
        Self {
            id: Some(model.id),
            slot: model.slot,
            kind: model.kind,
            url: model.url.clone(),
            label: model.label.clone(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct PublicHeroResponse {
    pub main: ResolvedHeroMedia,
    pub side: ResolvedHeroMedia,
}
