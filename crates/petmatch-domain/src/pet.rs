//! Pet domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Listing status of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    #[default]
    Available,
    Adopted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pet status: {0}")]
pub struct UnknownPetStatus(pub String);

impl PetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Adopted => "adopted",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetStatus {
    type Err = UnknownPetStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "adopted" => Ok(Self::Adopted),
            other => Err(UnknownPetStatus(other.to_owned())),
        }
    }
}
