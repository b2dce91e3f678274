//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. Closed set: anything else is rejected at the input boundary.
///
/// Wire and storage format: lowercase string (`adopter`, `shelter`, `admin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Adopter,
    Shelter,
    Admin,
}

/// Returned when a string does not name a known [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adopter => "adopter",
            Self::Shelter => "shelter",
            Self::Admin => "admin",
        }
    }

    /// Parse a role chosen at self-registration.
    ///
    /// Trims and case-folds the input. Only `adopter` and `shelter` are accepted;
    /// admin accounts are never self-registered.
    pub fn parse_registrable(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "adopter" => Some(Self::Adopter),
            "shelter" => Some(Self::Shelter),
            _ => None,
        }
    }

    /// Whether a freshly created account with this role starts approved.
    pub fn approved_on_creation(self) -> bool {
        !matches!(self, Self::Shelter)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Strict parse of the stored form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adopter" => Ok(Self::Adopter),
            "shelter" => Ok(Self::Shelter),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Normalise an email address for lookup and storage.
pub fn fold_email(email: &str) -> String {
    email.trim().to_lowercase()
}
