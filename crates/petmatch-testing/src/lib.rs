//! Test utilities for PetMatch services.
//!
//! Provides `MockAuth` for minting bearer tokens without a login round-trip.
//! Import in tests only, never in production code.

pub mod auth;
