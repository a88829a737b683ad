use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::dto::{
    AdminListResponse, AdminUser, AuthResponse, DeleteUserRequest, LoginRequest, SelfResponse,
    SelfUser, SignupRequest,
};
use super::extractors::{require_role, CurrentUser};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use super::repo::{Role, User};
use crate::error::ApiError;
use crate::state::AppState;

const MISSING_FIELDS: &str = "Provide all required fields";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub fn self_routes() -> Router<AppState> {
    Router::new().route("/users/self", get(get_self))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin", get(list_users).delete(delete_user))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (Some(name), Some(email), Some(password)) = (payload.name, payload.email, payload.password)
    else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    }
    let email = email.trim().to_lowercase();

    // Sequential existence checks; the unique constraints backstop the race.
    if User::find_by_name(&state.db, &name).await?.is_some() {
        warn!(%name, "signup name taken");
        return Err(ApiError::bad_request("Name already exists"));
    }
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "signup email taken");
        return Err(ApiError::bad_request("Email already exists"));
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &name, &email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.name, &user.email)?;

    info!(user_id = %user.id, name = %user.name, "user registered");
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };
    let email = email.trim().to_lowercase();

    // Unknown email and wrong password produce the same message so the
    // endpoint cannot be used to enumerate accounts.
    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(%email, "login unknown email");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.name, &user.email)?;

    info!(user_id = %user.id, name = %user.name, "user logged in");
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token))))
}

#[instrument(skip_all)]
pub async fn get_self(CurrentUser(user): CurrentUser) -> Json<SelfResponse> {
    Json(SelfResponse {
        status: "success",
        data: SelfUser {
            name: user.name,
            email: user.email,
            role: user.role,
        },
    })
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<AdminListResponse>, ApiError> {
    require_role(&user, Role::Admin)?;

    let users = User::list_all(&state.db).await?;
    let data = users
        .into_iter()
        .map(|u| AdminUser {
            user_id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
        })
        .collect();
    Ok(Json(AdminListResponse {
        status: "success",
        data,
    }))
}

#[instrument(skip(state, user, payload))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<DeleteUserRequest>,
) -> Result<Json<Value>, ApiError> {
    require_role(&user, Role::Admin)?;

    let Some(email) = payload.email else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let deleted = User::delete_by_email(&state.db, &email).await?;
    if deleted == 0 {
        return Err(ApiError::bad_request("No user with that email"));
    }

    info!(%email, by = %user.name, "user deleted");
    Ok(Json(json!({ "status": "success" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_shape() {
        let res = AuthResponse::new("abc.def.ghi".into());
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["token"], "abc.def.ghi");
    }

    #[test]
    fn unknown_email_and_bad_password_share_a_message() {
        // Both login failure paths must be indistinguishable to the caller.
        let a = ApiError::unauthorized(INVALID_CREDENTIALS);
        let b = ApiError::unauthorized(INVALID_CREDENTIALS);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.to_string(), "Invalid email or password");
    }
}
