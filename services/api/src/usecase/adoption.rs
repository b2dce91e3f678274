use petmatch_domain::adoption::AdoptionStatus;
use petmatch_domain::id::{AdoptionRequestId, PetId};
use petmatch_domain::user::Role;

use crate::domain::repository::{AdoptionRequestRepository, PetRepository};
use crate::domain::types::{AdoptionRequest, AdoptionRequestDetails, NewAdoptionRequest, User};
use crate::error::ApiError;

// ── CreateAdoptionRequest ────────────────────────────────────────────────────

pub struct CreateAdoptionRequestUseCase<A: AdoptionRequestRepository, P: PetRepository> {
    pub requests: A,
    pub pets: P,
}

impl<A: AdoptionRequestRepository, P: PetRepository> CreateAdoptionRequestUseCase<A, P> {
    /// Submit a pending request. Pet availability and earlier requests are not checked.
    pub async fn execute(
        &self,
        actor: &User,
        pet_id: PetId,
        message: String,
    ) -> Result<AdoptionRequest, ApiError> {
        if actor.role != Role::Adopter {
            return Err(ApiError::AdopterRoleRequired);
        }
        if self.pets.find_by_id(pet_id).await?.is_none() {
            return Err(ApiError::PetNotFound);
        }
        let request = NewAdoptionRequest {
            pet_id,
            adopter_id: actor.id,
            message,
            status: AdoptionStatus::Pending,
        };
        let created = self.requests.create(&request).await?;
        tracing::info!(
            request_id = %created.id,
            pet_id = %pet_id,
            adopter_id = %actor.id,
            "adoption request submitted"
        );
        Ok(created)
    }
}

// ── ListAdoptionRequests ─────────────────────────────────────────────────────

pub struct ListAdoptionRequestsUseCase<A: AdoptionRequestRepository> {
    pub requests: A,
}

impl<A: AdoptionRequestRepository> ListAdoptionRequestsUseCase<A> {
    /// Requests targeting pets the shelter owns.
    pub async fn for_shelter(&self, shelter: &User) -> Result<Vec<AdoptionRequestDetails>, ApiError> {
        self.requests.list_by_shelter(shelter.id).await
    }

    /// Requests the adopter sent.
    pub async fn for_adopter(&self, adopter: &User) -> Result<Vec<AdoptionRequestDetails>, ApiError> {
        self.requests.list_by_adopter(adopter.id).await
    }

    /// Dispatch on the caller's role. Admins have no request view.
    pub async fn execute(&self, actor: &User) -> Result<Vec<AdoptionRequestDetails>, ApiError> {
        match actor.role {
            Role::Shelter => self.for_shelter(actor).await,
            Role::Adopter => self.for_adopter(actor).await,
            Role::Admin => Err(ApiError::InsufficientPermissions),
        }
    }
}

// ── UpdateAdoptionStatus ─────────────────────────────────────────────────────

pub struct UpdateAdoptionStatusUseCase<A: AdoptionRequestRepository, P: PetRepository> {
    pub requests: A,
    pub pets: P,
}

impl<A: AdoptionRequestRepository, P: PetRepository> UpdateAdoptionStatusUseCase<A, P> {
    /// Set the status verbatim. Any status may follow any other, and the pet
    /// itself is left untouched.
    pub async fn execute(
        &self,
        actor: &User,
        id: AdoptionRequestId,
        status: AdoptionStatus,
    ) -> Result<AdoptionRequest, ApiError> {
        let request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RequestNotFound)?;
        let pet = self
            .pets
            .find_by_id(request.pet_id)
            .await?
            .ok_or(ApiError::PetNotFound)?;
        if pet.shelter_id != actor.id {
            return Err(ApiError::ShelterOwnership);
        }
        let updated = self.requests.update_status(id, status).await?;
        tracing::info!(
            request_id = %id,
            from = %request.status,
            to = %status,
            "adoption request status changed"
        );
        Ok(updated)
    }
}
