use petmatch_auth_types::token::{TokenSubject, issue_token, validate_token};
use petmatch_domain::user::{Role, fold_email};

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    ADMIN_DISPLAY_NAME, MIN_NAME_LEN, MIN_PASSWORD_LEN, NewUser, User, validate_email,
};
use crate::error::ApiError;
use crate::usecase::password::{hash_password, verify_dummy, verify_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Raw role name as submitted. Only `adopter` and `shelter` are accepted.
    pub role: String,
    pub shelter_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    /// Create an account. Shelters start unapproved; adopters are approved at once.
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        let name = input.name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(ApiError::Validation(format!(
                "name must be at least {MIN_NAME_LEN} characters"
            )));
        }
        let email = fold_email(&input.email);
        if !validate_email(&email) {
            return Err(ApiError::Validation("email is invalid".to_owned()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let role = Role::parse_registrable(&input.role).ok_or(ApiError::UnsupportedRole)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailInUse);
        }

        let user = NewUser {
            name: name.to_owned(),
            email,
            password_hash: hash_password(&input.password)?,
            role,
            shelter_name: input.shelter_name,
            phone: input.phone,
            city: input.city,
            is_approved: role.approved_on_creation(),
        };
        self.repo.create(&user).await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub expires_at: u64,
    pub user: User,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password fail identically.
    pub async fn execute(&self, email: &str, password: &str) -> Result<LoginOutput, ApiError> {
        let email = fold_email(email);
        let Some(user) = self.repo.find_by_email(&email).await? else {
            verify_dummy(password);
            return Err(ApiError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }
        if user.role == Role::Shelter && !user.is_approved {
            return Err(ApiError::ShelterNotApproved);
        }

        let subject = TokenSubject {
            user_id: user.id,
            role: user.role,
            name: &user.name,
            email: &user.email,
        };
        let (token, expires_at) = issue_token(&subject, &self.jwt_secret)
            .map_err(|e| anyhow::Error::new(e).context("issue token"))?;

        tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
        Ok(LoginOutput {
            token,
            expires_at,
            user,
        })
    }
}

// ── ResolveToken ─────────────────────────────────────────────────────────────

pub struct ResolveTokenUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> ResolveTokenUseCase<R> {
    /// Validate a bearer token and load the account it names.
    ///
    /// Bad signature, wrong algorithm, expiry, malformed payload and a deleted
    /// account all collapse into `InvalidCredentials`.
    pub async fn execute(&self, token: &str) -> Result<User, ApiError> {
        let info = validate_token(token, &self.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            ApiError::InvalidCredentials
        })?;
        self.repo
            .find_by_id(info.user_id)
            .await?
            .ok_or(ApiError::InvalidCredentials)
    }
}

// ── EnsureAdmin ──────────────────────────────────────────────────────────────

pub struct EnsureAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> EnsureAdminUseCase<R> {
    /// Create the administrator account unless `email` is already taken.
    ///
    /// Returns `true` if an account was created. Never updates an existing one.
    pub async fn execute(&self, email: &str, password: &str) -> Result<bool, ApiError> {
        let email = fold_email(email);
        if email.is_empty() || password.trim().is_empty() {
            return Err(ApiError::AdminCredentialsUnset);
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let admin = NewUser {
            name: ADMIN_DISPLAY_NAME.to_owned(),
            email,
            password_hash: hash_password(password)?,
            role: Role::Admin,
            shelter_name: None,
            phone: None,
            city: None,
            is_approved: true,
        };
        let created = self.repo.create(&admin).await?;
        tracing::info!(user_id = %created.id, email = %created.email, "admin account created");
        Ok(true)
    }
}
