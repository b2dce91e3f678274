use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAdoptionRequestRepository, DbPetRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn pet_repo(&self) -> DbPetRepository {
        DbPetRepository {
            db: self.db.clone(),
        }
    }

    pub fn adoption_repo(&self) -> DbAdoptionRequestRepository {
        DbAdoptionRequestRepository {
            db: self.db.clone(),
        }
    }
}
