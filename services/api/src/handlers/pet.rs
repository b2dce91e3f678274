use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use petmatch_domain::id::{PetId, UserId};
use petmatch_domain::pet::PetStatus;

use crate::domain::types::{Pet, PetFilter};
use crate::error::ApiError;
use crate::extract::{CurrentUser, IdPath, JsonBody};
use crate::handlers::present;
use crate::state::AppState;
use crate::usecase::pet::{
    CreatePetUseCase, DeletePetUseCase, GetPetUseCase, ListPetsUseCase, PetInput,
    UpdatePetUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: PetId,
    pub shelter_id: UserId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub status: PetStatus,
    #[serde(serialize_with = "petmatch_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "petmatch_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            shelter_id: pet.shelter_id,
            name: pet.name,
            species: pet.species,
            breed: pet.breed,
            age: pet.age,
            description: pet.description,
            location: pet.location,
            photo_url: pet.photo_url,
            status: pet.status,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct PetEnvelope {
    pub pet: PetResponse,
}

#[derive(Serialize)]
pub struct PetsEnvelope {
    pub pets: Vec<PetResponse>,
}

// ── GET /api/v1/pets ─────────────────────────────────────────────────────────

/// Raw catalog query. Unparseable numbers are dropped, not rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListQuery {
    pub species: Option<String>,
    pub breed: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub shelter_id: Option<String>,
}

impl PetListQuery {
    /// `None` when the query can match no pet: a status other than the exact
    /// stored values.
    pub fn into_filter(self) -> Option<PetFilter> {
        let status = match present(self.status) {
            None => None,
            Some(raw) => Some(raw.parse::<PetStatus>().ok()?),
        };
        Some(PetFilter {
            species: present(self.species),
            breed: present(self.breed),
            location: present(self.location),
            status,
            shelter_id: present(self.shelter_id)
                .and_then(|s| s.parse::<UserId>().ok())
                .filter(|id| id.0 >= 0),
            min_age: present(self.min_age).and_then(|s| s.parse::<u32>().ok()),
            max_age: present(self.max_age).and_then(|s| s.parse::<u32>().ok()),
        })
    }
}

pub async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<PetListQuery>,
) -> Result<Json<PetsEnvelope>, ApiError> {
    let usecase = ListPetsUseCase {
        repo: state.pet_repo(),
    };
    let Some(filter) = query.into_filter() else {
        return Ok(Json(PetsEnvelope { pets: Vec::new() }));
    };
    let pets = usecase.execute(&filter).await?;
    Ok(Json(PetsEnvelope {
        pets: pets.into_iter().map(PetResponse::from).collect(),
    }))
}

// ── GET /api/v1/pets/{id} ────────────────────────────────────────────────────

pub async fn get_pet(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<PetEnvelope>, ApiError> {
    let usecase = GetPetUseCase {
        repo: state.pet_repo(),
    };
    let pet = usecase.execute(PetId(id)).await?;
    Ok(Json(PetEnvelope { pet: pet.into() }))
}

// ── POST /api/v1/pets ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub photo_url: Option<String>,
}

impl From<CreatePetRequest> for PetInput {
    fn from(body: CreatePetRequest) -> Self {
        Self {
            name: body.name,
            species: body.species,
            breed: body.breed,
            age: body.age,
            description: body.description,
            location: body.location,
            photo_url: body.photo_url,
        }
    }
}

pub async fn create_pet(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    JsonBody(body): JsonBody<CreatePetRequest>,
) -> Result<(StatusCode, Json<PetEnvelope>), ApiError> {
    let usecase = CreatePetUseCase {
        repo: state.pet_repo(),
    };
    let pet = usecase.execute(&actor, body.into()).await?;
    Ok((StatusCode::CREATED, Json(PetEnvelope { pet: pet.into() })))
}

// ── PUT /api/v1/pets/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(flatten)]
    pub fields: CreatePetRequest,
    pub status: PetStatus,
}

pub async fn update_pet(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(id): IdPath<i32>,
    JsonBody(body): JsonBody<UpdatePetRequest>,
) -> Result<Json<PetEnvelope>, ApiError> {
    let usecase = UpdatePetUseCase {
        repo: state.pet_repo(),
    };
    let pet = usecase
        .execute(&actor, PetId(id), body.fields.into(), body.status)
        .await?;
    Ok(Json(PetEnvelope { pet: pet.into() }))
}

// ── DELETE /api/v1/pets/{id} ─────────────────────────────────────────────────

pub async fn delete_pet(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(id): IdPath<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeletePetUseCase {
        repo: state.pet_repo(),
    };
    usecase.execute(&actor, PetId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
