use chrono::{DateTime, Utc};

use petmatch_domain::adoption::AdoptionStatus;
use petmatch_domain::id::{AdoptionRequestId, PetId, UserId};
use petmatch_domain::pet::PetStatus;
use petmatch_domain::user::Role;

/// Account record as loaded from the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub shelter_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account to insert. The store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub shelter_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub is_approved: bool,
}

/// Admin listing filter. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub approved: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Pet {
    pub id: PetId,
    pub shelter_id: UserId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub description: String,
    pub location: String,
    pub photo_url: Option<String>,
    pub status: PetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPet {
    pub shelter_id: UserId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub description: String,
    pub location: String,
    pub photo_url: Option<String>,
    pub status: PetStatus,
}

/// Catalog filter. All set fields must match (AND).
///
/// `species`, `breed`, `status` and `shelter_id` match exactly, `location` by
/// substring, `min_age`/`max_age` are inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub species: Option<String>,
    pub breed: Option<String>,
    pub location: Option<String>,
    pub status: Option<PetStatus>,
    pub shelter_id: Option<UserId>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AdoptionRequest {
    pub id: AdoptionRequestId,
    pub pet_id: PetId,
    pub adopter_id: UserId,
    pub message: String,
    pub status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdoptionRequest {
    pub pet_id: PetId,
    pub adopter_id: UserId,
    pub message: String,
    pub status: AdoptionStatus,
}

/// An adoption request together with the pet it targets and the adopter who sent it.
#[derive(Debug, Clone)]
pub struct AdoptionRequestDetails {
    pub request: AdoptionRequest,
    pub pet: Pet,
    pub adopter: User,
}

/// Display name of the bootstrapped administrator account.
pub const ADMIN_DISPLAY_NAME: &str = "Platform Admin";

/// Minimum account name length, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Syntactic email check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.starts_with('.'),
        None => false,
    }
}
