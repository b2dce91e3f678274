use petmatch_domain::id::PetId;
use petmatch_domain::pet::PetStatus;
use petmatch_domain::user::Role;

use crate::domain::repository::PetRepository;
use crate::domain::types::{NewPet, Pet, PetFilter, User};
use crate::error::ApiError;

/// Descriptive fields shared by create and update.
pub struct PetInput {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub description: String,
    pub location: String,
    pub photo_url: Option<String>,
}

impl PetInput {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".to_owned()));
        }
        if self.species.trim().is_empty() {
            return Err(ApiError::Validation("species is required".to_owned()));
        }
        Ok(())
    }
}

fn require_shelter(actor: &User) -> Result<(), ApiError> {
    if actor.role != Role::Shelter {
        return Err(ApiError::ShelterRoleRequired);
    }
    Ok(())
}

/// Role check, then existence, then ownership.
async fn owned_pet<R: PetRepository>(repo: &R, actor: &User, id: PetId) -> Result<Pet, ApiError> {
    require_shelter(actor)?;
    let pet = repo.find_by_id(id).await?.ok_or(ApiError::PetNotFound)?;
    if pet.shelter_id != actor.id {
        return Err(ApiError::UnauthorizedPetAccess);
    }
    Ok(pet)
}

// ── ListPets ─────────────────────────────────────────────────────────────────

pub struct ListPetsUseCase<R: PetRepository> {
    pub repo: R,
}

impl<R: PetRepository> ListPetsUseCase<R> {
    pub async fn execute(&self, filter: &PetFilter) -> Result<Vec<Pet>, ApiError> {
        self.repo.list(filter).await
    }
}

// ── GetPet ───────────────────────────────────────────────────────────────────

pub struct GetPetUseCase<R: PetRepository> {
    pub repo: R,
}

impl<R: PetRepository> GetPetUseCase<R> {
    pub async fn execute(&self, id: PetId) -> Result<Pet, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::PetNotFound)
    }
}

// ── CreatePet ────────────────────────────────────────────────────────────────

pub struct CreatePetUseCase<R: PetRepository> {
    pub repo: R,
}

impl<R: PetRepository> CreatePetUseCase<R> {
    /// New pets are always `available` and owned by `actor`.
    pub async fn execute(&self, actor: &User, input: PetInput) -> Result<Pet, ApiError> {
        require_shelter(actor)?;
        input.validate()?;
        let pet = NewPet {
            shelter_id: actor.id,
            name: input.name,
            species: input.species,
            breed: input.breed,
            age: input.age,
            description: input.description,
            location: input.location,
            photo_url: input.photo_url,
            status: PetStatus::Available,
        };
        let created = self.repo.create(&pet).await?;
        tracing::info!(pet_id = %created.id, shelter_id = %actor.id, "pet listed");
        Ok(created)
    }
}

// ── UpdatePet ────────────────────────────────────────────────────────────────

pub struct UpdatePetUseCase<R: PetRepository> {
    pub repo: R,
}

impl<R: PetRepository> UpdatePetUseCase<R> {
    /// Overwrite every descriptive field and the status. Ownership never changes.
    pub async fn execute(
        &self,
        actor: &User,
        id: PetId,
        input: PetInput,
        status: PetStatus,
    ) -> Result<Pet, ApiError> {
        let pet = owned_pet(&self.repo, actor, id).await?;
        input.validate()?;
        let updated = Pet {
            name: input.name,
            species: input.species,
            breed: input.breed,
            age: input.age,
            description: input.description,
            location: input.location,
            photo_url: input.photo_url,
            status,
            ..pet
        };
        self.repo.update(&updated).await
    }
}

// ── DeletePet ────────────────────────────────────────────────────────────────

pub struct DeletePetUseCase<R: PetRepository> {
    pub repo: R,
}

impl<R: PetRepository> DeletePetUseCase<R> {
    /// Hard delete. Requests for the pet are removed with it.
    pub async fn execute(&self, actor: &User, id: PetId) -> Result<(), ApiError> {
        owned_pet(&self.repo, actor, id).await?;
        if !self.repo.delete(id).await? {
            return Err(ApiError::PetNotFound);
        }
        tracing::info!(pet_id = %id, shelter_id = %actor.id, "pet deleted");
        Ok(())
    }
}
