use axum::{extract::FromRequestParts, http::request::Parts};
use menu::OwnerId;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Signed-in administrator extracted from the `Authorization: Bearer <token>` header.
///
/// The token subject is the owner id every menu document is keyed by.
pub struct AuthUser {
    pub owner_id: OwnerId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;
        let owner_id = OwnerId::new(claims.sub).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser { owner_id })
    }
}
