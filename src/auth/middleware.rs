use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{bearer_token, jwt};
use crate::entities::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::storage::users::{self, IdentityProfile};

/// Authenticated user extracted from the `Authorization: Bearer <identity token>` header.
///
/// The token is verified against the identity provider's shared secret and the
/// local profile row is created or refreshed from its claims. Use as an
/// extractor in handler parameters to require authentication:
/// ```ignore
/// async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .map_err(|()| {
                AppError::Unauthorized("Invalid authorization header format.".to_string())
            })?
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header.".to_string()))?;

        let claims = jwt::validate_identity_token(
            token,
            &state.config.identity_token_secret,
            state.config.identity_token_issuer.as_deref(),
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected identity token");
            AppError::Unauthorized("Invalid or expired token.".to_string())
        })?;

        let grant_admin = claims
            .email
            .as_deref()
            .is_some_and(|email| state.config.is_admin_email(email));

        let profile = IdentityProfile::from(claims);
        let user_model = users::upsert_identity(&state.db, &profile, grant_admin).await?;

        Ok(Self(user_model))
    }
}

/// Requires the authenticated user to have the `"admin"` role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub user::Model);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user_model) = AuthUser::from_request_parts(parts, state).await?;

        if !user_model.is_admin() {
            return Err(AppError::Forbidden("Admin access required.".to_string()));
        }

        Ok(Self(user_model))
    }
}
