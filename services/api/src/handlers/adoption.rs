use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use petmatch_domain::adoption::AdoptionStatus;
use petmatch_domain::id::{AdoptionRequestId, PetId, UserId};

use crate::domain::types::{AdoptionRequest, AdoptionRequestDetails};
use crate::error::ApiError;
use crate::extract::{CurrentUser, IdPath, JsonBody};
use crate::handlers::auth::UserResponse;
use crate::handlers::pet::PetResponse;
use crate::state::AppState;
use crate::usecase::adoption::{
    CreateAdoptionRequestUseCase, ListAdoptionRequestsUseCase, UpdateAdoptionStatusUseCase,
};

/// Adoption request, optionally with its pet and adopter attached (listings only).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestResponse {
    pub id: AdoptionRequestId,
    pub pet_id: PetId,
    pub adopter_id: UserId,
    pub message: String,
    pub status: AdoptionStatus,
    #[serde(serialize_with = "petmatch_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "petmatch_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet: Option<PetResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adopter: Option<UserResponse>,
}

impl From<AdoptionRequest> for AdoptionRequestResponse {
    fn from(request: AdoptionRequest) -> Self {
        Self {
            id: request.id,
            pet_id: request.pet_id,
            adopter_id: request.adopter_id,
            message: request.message,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
            pet: None,
            adopter: None,
        }
    }
}

impl From<AdoptionRequestDetails> for AdoptionRequestResponse {
    fn from(details: AdoptionRequestDetails) -> Self {
        Self {
            pet: Some(details.pet.into()),
            adopter: Some(details.adopter.into()),
            ..details.request.into()
        }
    }
}

#[derive(Serialize)]
pub struct RequestEnvelope {
    pub request: AdoptionRequestResponse,
}

#[derive(Serialize)]
pub struct RequestsEnvelope {
    pub requests: Vec<AdoptionRequestResponse>,
}

// ── POST /api/v1/pets/{id}/adoption-requests ─────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAdoptionRequestRequest {
    #[serde(default)]
    pub message: String,
}

pub async fn create_adoption_request(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(pet_id): IdPath<i32>,
    JsonBody(body): JsonBody<CreateAdoptionRequestRequest>,
) -> Result<(StatusCode, Json<RequestEnvelope>), ApiError> {
    let usecase = CreateAdoptionRequestUseCase {
        requests: state.adoption_repo(),
        pets: state.pet_repo(),
    };
    let request = usecase
        .execute(&actor, PetId(pet_id), body.message)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RequestEnvelope {
            request: request.into(),
        }),
    ))
}

// ── GET /api/v1/adoption-requests ────────────────────────────────────────────

pub async fn list_adoption_requests(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<RequestsEnvelope>, ApiError> {
    let usecase = ListAdoptionRequestsUseCase {
        requests: state.adoption_repo(),
    };
    let requests = usecase.execute(&actor).await?;
    Ok(Json(RequestsEnvelope {
        requests: requests
            .into_iter()
            .map(AdoptionRequestResponse::from)
            .collect(),
    }))
}

// ── PATCH /api/v1/adoption-requests/{id} ─────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AdoptionStatus,
}

pub async fn update_adoption_status(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(id): IdPath<i32>,
    JsonBody(body): JsonBody<UpdateStatusRequest>,
) -> Result<Json<RequestEnvelope>, ApiError> {
    let usecase = UpdateAdoptionStatusUseCase {
        requests: state.adoption_repo(),
        pets: state.pet_repo(),
    };
    let request = usecase
        .execute(&actor, AdoptionRequestId(id), body.status)
        .await?;
    Ok(Json(RequestEnvelope {
        request: request.into(),
    }))
}
