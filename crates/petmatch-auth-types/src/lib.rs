//! Credential types for the PetMatch API.
//!
//! Provides JWT issuance and validation plus the `BearerToken` extractor.

pub mod bearer;
pub mod token;
