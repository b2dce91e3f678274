//! Request extractors and access-control middleware.

use axum::extract::{FromRequest, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use petmatch_auth_types::bearer::BearerToken;
use petmatch_domain::user::Role;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::ResolveTokenUseCase;

/// JSON body whose rejection renders as a `VALIDATION` error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path parameters whose rejection renders as a `VALIDATION` error.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// The authenticated account, inserted into request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::AuthenticationRequired);

        async move { result }
    }
}

/// Resolve the bearer token to an account and attach it to the request.
///
/// A missing or malformed header is rejected by [`BearerToken`]; a token that
/// fails validation or names a deleted account yields `AUTHENTICATION_REQUIRED`.
pub async fn authenticate(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let usecase = ResolveTokenUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let user = usecase.execute(&token).await.map_err(|e| match e {
        ApiError::InvalidCredentials => ApiError::AuthenticationRequired,
        other => other,
    })?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Admit only callers whose role is in the allowed set. Runs after [`authenticate`].
pub async fn allow_roles(
    State(allowed): State<&'static [Role]>,
    CurrentUser(user): CurrentUser,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !allowed.contains(&user.role) {
        tracing::debug!(user_id = %user.id, role = %user.role, "role not allowed");
        return Err(ApiError::InsufficientPermissions);
    }
    Ok(next.run(req).await)
}
