use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use petmatch_domain::id::UserId;
use petmatch_domain::user::Role;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::extract::{CurrentUser, JsonBody};
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, RegisterInput, RegisterUseCase};

pub const SHELTER_PENDING_MESSAGE: &str =
    "Tu cuenta de refugio será revisada por un administrador.";
pub const REGISTERED_MESSAGE: &str = "Registro completado.";

/// Public account representation. Never carries the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub is_approved: bool,
    #[serde(serialize_with = "petmatch_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "petmatch_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            shelter_name: user.shelter_name,
            phone: user.phone,
            city: user.city,
            is_approved: user.is_approved,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

// ── POST /api/v1/auth/register ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub shelter_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
            shelter_name: body.shelter_name,
            phone: body.phone,
            city: body.city,
        })
        .await?;
    let message = match user.role {
        Role::Shelter => SHELTER_PENDING_MESSAGE,
        _ => REGISTERED_MESSAGE,
    };
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            message,
        }),
    ))
}

// ── POST /api/v1/auth/login ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        token: out.token,
        user: out.user.into(),
    }))
}

// ── GET /api/v1/auth/me ──────────────────────────────────────────────────────

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserEnvelope> {
    Json(UserEnvelope { user: user.into() })
}
