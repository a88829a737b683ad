use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::JwtKeys;
use super::repo::{Role, User};
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the bearer token, verifies it and re-resolves the user record.
///
/// A token whose signature and expiry check out is still rejected when the
/// named user no longer exists (deleted by an admin after issuance).
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("You are not logged in! Please log in!"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        let user = User::find_by_name(&state.db, &claims.name)
            .await?
            .ok_or_else(|| ApiError::unauthorized("The user no longer exists"))?;

        Ok(CurrentUser(user))
    }
}

/// Role gate used before every admin-only operation.
pub fn require_role(user: &User, role: Role) -> Result<(), ApiError> {
    if user.role == role {
        Ok(())
    } else {
        warn!(name = %user.name, required = ?role, actual = ?user.role, "role check failed");
        Err(ApiError::forbidden(
            "You do not have permission to perform this action",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn make_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "ana".into(),
            email: "ana@example.com".into(),
            password_hash: "x".into(),
            role,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn admin_passes_admin_gate() {
        assert!(require_role(&make_user(Role::Admin), Role::Admin).is_ok());
    }

    #[test]
    fn plain_user_is_forbidden() {
        let err = require_role(&make_user(Role::User), Role::Admin).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
