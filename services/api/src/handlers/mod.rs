pub mod admin;
pub mod adoption;
pub mod auth;
pub mod pet;

/// Treat an empty query value as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
