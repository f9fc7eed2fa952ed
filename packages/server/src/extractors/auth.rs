use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Header carrying the voice-note integration secret.
pub const VOICE_SECRET_HEADER: &str = "x-voice-secret";

/// Authenticated dashboard user.
///
/// The access token is read from the session cookie first, then from an
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = &state.config.auth;

        let from_cookie = CookieJar::from_headers(&parts.headers)
            .get(&auth.session_cookie)
            .map(|c| c.value().to_string());

        let token = match from_cookie {
            Some(token) => token,
            None => {
                let header = parts
                    .headers
                    .get("Authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or(AppError::TokenMissing)?;
                header
                    .strip_prefix("Bearer ")
                    .ok_or(AppError::TokenInvalid)?
                    .to_string()
            }
        };

        let claims = jwt::verify(&token, &auth.jwt_secret, auth.audience.as_deref())
            .map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Caller authenticated by the shared integration secret.
#[derive(Debug, Clone)]
pub struct IntegrationCaller {
    /// Configured identity recorded on rows the integration creates.
    pub user_id: String,
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

impl FromRequestParts<AppState> for IntegrationCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let integration = &state.config.integration;

        let provided = parts
            .headers
            .get(VOICE_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        if integration.voice_secret.is_empty()
            || digest(provided) != digest(&integration.voice_secret)
        {
            return Err(AppError::TokenInvalid);
        }

        Ok(IntegrationCaller {
            user_id: integration.voice_user_id.clone(),
        })
    }
}
