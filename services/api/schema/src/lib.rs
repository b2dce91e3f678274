//! SeaORM entities for the PetMatch API store.

pub mod adoption_requests;
pub mod pets;
pub mod users;
