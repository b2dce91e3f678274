use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use petmatch_domain::id::UserId;
use petmatch_domain::user::Role;

use crate::domain::types::UserFilter;
use crate::error::ApiError;
use crate::extract::IdPath;
use crate::handlers::auth::UserResponse;
use crate::handlers::present;
use crate::state::AppState;
use crate::usecase::admin::{ApproveShelterUseCase, ListUsersUseCase};

// ── GET /api/v1/admin/users ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub approved: Option<String>,
}

#[derive(Serialize)]
pub struct UsersEnvelope {
    pub users: Vec<UserResponse>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UsersEnvelope>, ApiError> {
    // An unknown role matches no account.
    let role = match present(query.role) {
        None => None,
        Some(raw) => match raw.to_ascii_lowercase().parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => return Ok(Json(UsersEnvelope { users: Vec::new() })),
        },
    };
    let filter = UserFilter {
        role,
        approved: present(query.approved).map(|v| v.eq_ignore_ascii_case("true")),
    };
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(&filter).await?;
    Ok(Json(UsersEnvelope {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

// ── POST /api/v1/admin/shelters/{id}/approve ─────────────────────────────────

#[derive(Serialize)]
pub struct ApproveResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

pub async fn approve_shelter(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<ApproveResponse>, ApiError> {
    let usecase = ApproveShelterUseCase {
        repo: state.user_repo(),
    };
    let out = usecase.execute(UserId(id)).await?;
    let message = if out.already_approved {
        "shelter already approved"
    } else {
        "shelter approved"
    };
    Ok(Json(ApproveResponse {
        message,
        user: out.user.into(),
    }))
}
