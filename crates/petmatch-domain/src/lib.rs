//! Domain types shared across PetMatch crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` converts to and from
//! the persisted string forms through [`std::str::FromStr`] and [`std::fmt::Display`].

pub mod adoption;
pub mod id;
pub mod pet;
pub mod user;
