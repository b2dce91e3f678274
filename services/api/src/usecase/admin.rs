use petmatch_domain::id::UserId;
use petmatch_domain::user::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserFilter};
use crate::error::ApiError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError> {
        self.repo.list(filter).await
    }
}

// ── ApproveShelter ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApproveShelterOutput {
    pub user: User,
    pub already_approved: bool,
}

pub struct ApproveShelterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ApproveShelterUseCase<R> {
    /// Mark `user` approved and persist it.
    pub async fn approve(&self, user: &mut User) -> Result<(), ApiError> {
        self.repo.set_approved(user.id).await?;
        user.is_approved = true;
        Ok(())
    }

    /// Look up a shelter account and approve it. Approving twice is a no-op.
    pub async fn execute(&self, id: UserId) -> Result<ApproveShelterOutput, ApiError> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if user.role != Role::Shelter {
            return Err(ApiError::NotAShelter);
        }
        if user.is_approved {
            return Ok(ApproveShelterOutput {
                user,
                already_approved: true,
            });
        }
        self.approve(&mut user).await?;
        tracing::info!(user_id = %user.id, "shelter approved");
        Ok(ApproveShelterOutput {
            user,
            already_approved: false,
        })
    }
}
