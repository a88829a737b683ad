use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::Role;

/// Signup body. Fields are optional so a missing one yields a 400 presence
/// error rather than a body-rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub email: Option<String>,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub data: TokenData,
}

#[derive(Debug, Serialize)]
pub struct TokenData {
    pub token: String,
}

impl AuthResponse {
    pub fn new(token: String) -> Self {
        Self {
            status: "success",
            data: TokenData { token },
        }
    }
}

/// Own-profile view returned by /users/self.
#[derive(Debug, Serialize)]
pub struct SelfResponse {
    pub status: &'static str,
    pub data: SelfUser,
}

#[derive(Debug, Serialize)]
pub struct SelfUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Admin listing entry; `user_id` is the field name the dashboard expects.
#[derive(Debug, Serialize)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct AdminListResponse {
    pub status: &'static str,
    pub data: Vec<AdminUser>,
}
