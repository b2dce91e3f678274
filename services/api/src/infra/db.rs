use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
};

use petmatch_api_schema::{adoption_requests, pets, users};
use petmatch_domain::adoption::AdoptionStatus;
use petmatch_domain::id::{AdoptionRequestId, PetId, UserId};
use petmatch_domain::pet::PetStatus;
use petmatch_domain::user::Role;

use crate::domain::repository::{AdoptionRequestRepository, PetRepository, UserRepository};
use crate::domain::types::{
    AdoptionRequest, AdoptionRequestDetails, NewAdoptionRequest, NewPet, NewUser, Pet, PetFilter,
    User, UserFilter,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            shelter_name: Set(user.shelter_name.clone()),
            phone: Set(user.phone.clone()),
            city: Set(user.city.clone()),
            is_approved: Set(user.is_approved),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_violation_or(e, ApiError::EmailInUse, "create user"))?;
        user_from_model(model)
    }

    async fn set_approved(&self, id: UserId) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id.0),
            is_approved: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("approve user")?;
        Ok(())
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError> {
        let mut query = users::Entity::find();
        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        if let Some(approved) = filter.approved {
            query = query.filter(users::Column::IsApproved.eq(approved));
        }
        let models = query
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = model
        .role
        .parse::<Role>()
        .with_context(|| format!("user {} has an invalid role", model.id))?;
    Ok(User {
        id: UserId(model.id),
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role,
        shelter_name: model.shelter_name,
        phone: model.phone,
        city: model.city,
        is_approved: model.is_approved,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Map a unique-constraint violation to `on_conflict`, anything else to `Internal`.
fn unique_violation_or(err: DbErr, on_conflict: ApiError, context: &'static str) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_conflict,
        _ => ApiError::Internal(anyhow::Error::new(err).context(context)),
    }
}

// ── Pet repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPetRepository {
    pub db: DatabaseConnection,
}

impl PetRepository for DbPetRepository {
    async fn find_by_id(&self, id: PetId) -> Result<Option<Pet>, ApiError> {
        let model = pets::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find pet by id")?;
        model.map(pet_from_model).transpose()
    }

    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, ApiError> {
        let mut query = pets::Entity::find();
        if let Some(ref species) = filter.species {
            query = query.filter(pets::Column::Species.eq(species.as_str()));
        }
        if let Some(ref breed) = filter.breed {
            query = query.filter(pets::Column::Breed.eq(breed.as_str()));
        }
        if let Some(ref location) = filter.location {
            query = query.filter(pets::Column::Location.contains(location.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(pets::Column::Status.eq(status.as_str()));
        }
        if let Some(shelter_id) = filter.shelter_id {
            query = query.filter(pets::Column::ShelterId.eq(shelter_id.0));
        }
        if let Some(min_age) = filter.min_age {
            query = query.filter(pets::Column::Age.gte(i64::from(min_age)));
        }
        if let Some(max_age) = filter.max_age {
            query = query.filter(pets::Column::Age.lte(i64::from(max_age)));
        }
        let models = query
            .order_by_desc(pets::Column::CreatedAt)
            .order_by_desc(pets::Column::Id)
            .all(&self.db)
            .await
            .context("list pets")?;
        models.into_iter().map(pet_from_model).collect()
    }

    async fn create(&self, pet: &NewPet) -> Result<Pet, ApiError> {
        let now = Utc::now();
        let model = pets::ActiveModel {
            shelter_id: Set(pet.shelter_id.0),
            name: Set(pet.name.clone()),
            species: Set(pet.species.clone()),
            breed: Set(pet.breed.clone()),
            age: Set(age_to_column(pet.age)?),
            description: Set(pet.description.clone()),
            location: Set(pet.location.clone()),
            photo_url: Set(pet.photo_url.clone()),
            status: Set(pet.status.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create pet")?;
        pet_from_model(model)
    }

    async fn update(&self, pet: &Pet) -> Result<Pet, ApiError> {
        let model = pets::ActiveModel {
            id: Set(pet.id.0),
            name: Set(pet.name.clone()),
            species: Set(pet.species.clone()),
            breed: Set(pet.breed.clone()),
            age: Set(age_to_column(pet.age)?),
            description: Set(pet.description.clone()),
            location: Set(pet.location.clone()),
            photo_url: Set(pet.photo_url.clone()),
            status: Set(pet.status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update pet")?;
        pet_from_model(model)
    }

    async fn delete(&self, id: PetId) -> Result<bool, ApiError> {
        let result = pets::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete pet")?;
        Ok(result.rows_affected > 0)
    }
}

fn age_to_column(age: u32) -> Result<i32, ApiError> {
    i32::try_from(age).map_err(|_| ApiError::Validation("age is out of range".to_owned()))
}

fn pet_from_model(model: pets::Model) -> Result<Pet, ApiError> {
    let status = model
        .status
        .parse::<PetStatus>()
        .with_context(|| format!("pet {} has an invalid status", model.id))?;
    let age = u32::try_from(model.age)
        .with_context(|| format!("pet {} has a negative age", model.id))?;
    Ok(Pet {
        id: PetId(model.id),
        shelter_id: UserId(model.shelter_id),
        name: model.name,
        species: model.species,
        breed: model.breed,
        age,
        description: model.description,
        location: model.location,
        photo_url: model.photo_url,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Adoption request repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdoptionRequestRepository {
    pub db: DatabaseConnection,
}

impl AdoptionRequestRepository for DbAdoptionRequestRepository {
    async fn find_by_id(
        &self,
        id: AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, ApiError> {
        let model = adoption_requests::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find adoption request by id")?;
        model.map(request_from_model).transpose()
    }

    async fn create(&self, request: &NewAdoptionRequest) -> Result<AdoptionRequest, ApiError> {
        let now = Utc::now();
        let model = adoption_requests::ActiveModel {
            pet_id: Set(request.pet_id.0),
            adopter_id: Set(request.adopter_id.0),
            message: Set(request.message.clone()),
            status: Set(request.status.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create adoption request")?;
        request_from_model(model)
    }

    async fn update_status(
        &self,
        id: AdoptionRequestId,
        status: AdoptionStatus,
    ) -> Result<AdoptionRequest, ApiError> {
        let model = adoption_requests::ActiveModel {
            id: Set(id.0),
            status: Set(status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update adoption request status")?;
        request_from_model(model)
    }

    async fn list_by_shelter(
        &self,
        shelter_id: UserId,
    ) -> Result<Vec<AdoptionRequestDetails>, ApiError> {
        let rows = adoption_requests::Entity::find()
            .join(JoinType::InnerJoin, adoption_requests::Relation::Pet.def())
            .filter(pets::Column::ShelterId.eq(shelter_id.0))
            .order_by_desc(adoption_requests::Column::CreatedAt)
            .order_by_desc(adoption_requests::Column::Id)
            .all(&self.db)
            .await
            .context("list adoption requests by shelter")?;
        self.with_details(rows).await
    }

    async fn list_by_adopter(
        &self,
        adopter_id: UserId,
    ) -> Result<Vec<AdoptionRequestDetails>, ApiError> {
        let rows = adoption_requests::Entity::find()
            .filter(adoption_requests::Column::AdopterId.eq(adopter_id.0))
            .order_by_desc(adoption_requests::Column::CreatedAt)
            .order_by_desc(adoption_requests::Column::Id)
            .all(&self.db)
            .await
            .context("list adoption requests by adopter")?;
        self.with_details(rows).await
    }
}

impl DbAdoptionRequestRepository {
    /// Batch-load the pet and adopter of every row, preserving row order.
    async fn with_details(
        &self,
        rows: Vec<adoption_requests::Model>,
    ) -> Result<Vec<AdoptionRequestDetails>, ApiError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let pet_ids: Vec<i32> = rows.iter().map(|r| r.pet_id).collect();
        let adopter_ids: Vec<i32> = rows.iter().map(|r| r.adopter_id).collect();

        let pets_by_id: HashMap<i32, Pet> = pets::Entity::find()
            .filter(pets::Column::Id.is_in(pet_ids))
            .all(&self.db)
            .await
            .context("load pets for adoption requests")?
            .into_iter()
            .map(|m| pet_from_model(m).map(|p| (p.id.0, p)))
            .collect::<Result<_, _>>()?;
        let adopters_by_id: HashMap<i32, User> = users::Entity::find()
            .filter(users::Column::Id.is_in(adopter_ids))
            .all(&self.db)
            .await
            .context("load adopters for adoption requests")?
            .into_iter()
            .map(|m| user_from_model(m).map(|u| (u.id.0, u)))
            .collect::<Result<_, _>>()?;

        rows.into_iter()
            .map(|row| {
                let pet = pets_by_id
                    .get(&row.pet_id)
                    .cloned()
                    .with_context(|| format!("request {} references missing pet", row.id))?;
                let adopter = adopters_by_id
                    .get(&row.adopter_id)
                    .cloned()
                    .with_context(|| format!("request {} references missing adopter", row.id))?;
                Ok(AdoptionRequestDetails {
                    request: request_from_model(row)?,
                    pet,
                    adopter,
                })
            })
            .collect()
    }
}

fn request_from_model(model: adoption_requests::Model) -> Result<AdoptionRequest, ApiError> {
    let status = model
        .status
        .parse::<AdoptionStatus>()
        .with_context(|| format!("adoption request {} has an invalid status", model.id))?;
    Ok(AdoptionRequest {
        id: AdoptionRequestId(model.id),
        pet_id: PetId(model.pet_id),
        adopter_id: UserId(model.adopter_id),
        message: model.message,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
