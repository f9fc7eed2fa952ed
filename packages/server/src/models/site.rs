use chrono::{DateTime, Utc};
use common::ThemeKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::entity::{hero_theme, site_setting, site_tagline};
use crate::error::AppError;

pub const MAX_COLOR_LEN: usize = 64;
pub const MAX_TAGLINE_LEN: usize = 280;
pub const MAX_SETTING_KEY_LEN: usize = 64;

/// Tagline shown before one has been saved.
pub const DEFAULT_TAGLINE: &str = "Custom 3D prints, designed and made to order.";

/// Body of `POST /theme`.
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct ThemeRequest {
    /// One of `gradient`, `solid`, `custom-gradient`, `custom-solid`.
    #[schema(example = "gradient")]
    pub kind: String,
    #[serde(alias = "solidColor")]
    pub solid_color: Option<String>,
    #[serde(alias = "from_color", alias = "fromColor")]
    pub from: Option<String>,
    #[serde(alias = "to_color", alias = "toColor")]
    pub to: Option<String>,
}

/// A theme that passed validation. Only the colors its kind uses are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTheme {
    pub kind: ThemeKind,
    pub solid_color: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

fn color(field: &str, value: Option<&str>) -> Result<String, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::Validation(format!("'{field}' is required for this theme kind")));
    }
    if value.chars().count() > MAX_COLOR_LEN {
        return Err(AppError::Validation(format!(
            "'{field}' must be at most {MAX_COLOR_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

impl ThemeRequest {
    pub fn validate(&self) -> Result<ValidTheme, AppError> {
        let kind = ThemeKind::parse(&self.kind).ok_or_else(|| {
            AppError::Validation(format!(
                "Unknown theme kind '{}': expected gradient, solid, custom-gradient or custom-solid",
                self.kind
            ))
        })?;

        if kind.is_solid() {
            Ok(ValidTheme {
                kind,
                solid_color: Some(color("solid_color", self.solid_color.as_deref())?),
                from: None,
                to: None,
            })
        } else {
            Ok(ValidTheme {
                kind,
                solid_color: None,
                from: Some(color("from", self.from.as_deref())?),
                to: Some(color("to", self.to.as_deref())?),
            })
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ThemeResponse {
    pub kind: ThemeKind,
    pub solid_color: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// `None` for the built-in default.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ThemeResponse {
    /// Theme served before one has been saved.
    pub fn fallback() -> Self {
        Self {
            kind: ThemeKind::Gradient,
            solid_color: None,
            from: Some("#0f172a".into()),
            to: Some("#1e293b".into()),
            updated_at: None,
        }
    }
}

impl From<hero_theme::Model> for ThemeResponse {
    fn from(model: hero_theme::Model) -> Self {
        Self {
            kind: model.kind,
            solid_color: model.solid_color,
            from: model.from_color,
            to: model.to_color,
            updated_at: Some(model.updated_at),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SaveThemeResponse {
    pub ok: bool,
    pub theme: ThemeResponse,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SettingResponse {
    #[schema(example = "social")]
    pub key: String,
    pub value: Value,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<site_setting::Model> for SettingResponse {
    fn from(model: site_setting::Model) -> Self {
        Self {
            key: model.key,
            value: model.value,
            updated_at: Some(model.updated_at),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SaveSettingResponse {
    pub ok: bool,
    pub setting: SettingResponse,
}

/// Setting keys are 1-64 characters of `[a-z0-9_-]`.
pub fn validate_setting_key(key: &str) -> Result<(), AppError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_SETTING_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Setting key must be 1-{MAX_SETTING_KEY_LEN} characters of a-z, 0-9, '_' or '-'"
        )))
    }
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct TaglineRequest {
    pub tagline: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct TaglineResponse {
    pub tagline: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaglineResponse {
    pub fn fallback() -> Self {
        Self {
            tagline: DEFAULT_TAGLINE.to_string(),
            updated_at: None,
        }
    }
}

impl From<site_tagline::Model> for TaglineResponse {
    fn from(model: site_tagline::Model) -> Self {
        Self {
            tagline: model.tagline,
            updated_at: Some(model.updated_at),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SaveTaglineResponse {
    pub ok: bool,
    pub tagline: TaglineResponse,
}
