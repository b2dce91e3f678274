#![allow(async_fn_in_trait)]

use petmatch_domain::adoption::AdoptionStatus;
use petmatch_domain::id::{AdoptionRequestId, PetId, UserId};

use crate::domain::types::{
    AdoptionRequest, AdoptionRequestDetails, NewAdoptionRequest, NewPet, NewUser, Pet, PetFilter,
    User, UserFilter,
};
use crate::error::ApiError;

/// Repository for accounts.
///
/// Lookups return `Ok(None)` for absence; `Err` is reserved for store failures.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError>;

    /// `email` must already be folded.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Insert an account. Fails with `EmailInUse` if the store rejects a duplicate email.
    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;

    /// Set `is_approved = true`.
    async fn set_approved(&self, id: UserId) -> Result<(), ApiError>;

    /// Newest first.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError>;
}

/// Repository for the pet catalog.
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: PetId) -> Result<Option<Pet>, ApiError>;

    /// Newest first.
    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, ApiError>;

    async fn create(&self, pet: &NewPet) -> Result<Pet, ApiError>;

    /// Replace every mutable field of `pet` and bump `updated_at`.
    async fn update(&self, pet: &Pet) -> Result<Pet, ApiError>;

    /// Hard delete. Returns `true` if a row was deleted.
    async fn delete(&self, id: PetId) -> Result<bool, ApiError>;
}

/// Repository for adoption requests.
pub trait AdoptionRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: AdoptionRequestId)
    -> Result<Option<AdoptionRequest>, ApiError>;

    async fn create(&self, request: &NewAdoptionRequest) -> Result<AdoptionRequest, ApiError>;

    /// Overwrite the status and bump `updated_at`.
    async fn update_status(
        &self,
        id: AdoptionRequestId,
        status: AdoptionStatus,
    ) -> Result<AdoptionRequest, ApiError>;

    /// Requests for pets owned by `shelter_id`, newest first.
    async fn list_by_shelter(
        &self,
        shelter_id: UserId,
    ) -> Result<Vec<AdoptionRequestDetails>, ApiError>;

    /// Requests sent by `adopter_id`, newest first.
    async fn list_by_adopter(
        &self,
        adopter_id: UserId,
    ) -> Result<Vec<AdoptionRequestDetails>, ApiError>;
}
