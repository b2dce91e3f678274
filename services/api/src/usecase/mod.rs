pub mod admin;
pub mod adoption;
pub mod auth;
pub mod password;
pub mod pet;
