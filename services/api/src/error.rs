use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants. Each failure is mapped to a status code once, here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    EmailInUse,
    #[error("unsupported role")]
    UnsupportedRole,
    #[error("user is not a shelter")]
    NotAShelter,
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("shelter account pending approval")]
    ShelterNotApproved,
    #[error("insufficient permissions")]
    InsufficientPermissions,
    #[error("only shelters can manage pets")]
    ShelterRoleRequired,
    #[error("only adopters can submit requests")]
    AdopterRoleRequired,
    #[error("pet does not belong to shelter")]
    UnauthorizedPetAccess,
    #[error("request does not belong to shelter")]
    ShelterOwnership,
    #[error("pet not found")]
    PetNotFound,
    #[error("adoption request not found")]
    RequestNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("admin credentials must not be empty")]
    AdminCredentialsUnset,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::EmailInUse => "EMAIL_IN_USE",
            Self::UnsupportedRole => "UNSUPPORTED_ROLE",
            Self::NotAShelter => "NOT_A_SHELTER",
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ShelterNotApproved => "SHELTER_NOT_APPROVED",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::ShelterRoleRequired => "SHELTER_ROLE_REQUIRED",
            Self::AdopterRoleRequired => "ADOPTER_ROLE_REQUIRED",
            Self::UnauthorizedPetAccess => "UNAUTHORIZED_PET_ACCESS",
            Self::ShelterOwnership => "SHELTER_OWNERSHIP",
            Self::PetNotFound => "PET_NOT_FOUND",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AdminCredentialsUnset => "ADMIN_CREDENTIALS_UNSET",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // Duplicate email is a 400, not a 409.
            Self::Validation(_) | Self::EmailInUse | Self::UnsupportedRole | Self::NotAShelter => {
                StatusCode::BAD_REQUEST
            }
            Self::AuthenticationRequired | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::ShelterNotApproved
            | Self::InsufficientPermissions
            | Self::ShelterRoleRequired
            | Self::AdopterRoleRequired
            | Self::UnauthorizedPetAccess
            | Self::ShelterOwnership => StatusCode::FORBIDDEN,
            Self::PetNotFound | Self::RequestNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::AdminCredentialsUnset | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::Validation("invalid id".to_owned())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Only 500s are logged here; TraceLayer records every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
