//! `Authorization: Bearer <token>` extractor.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use http::{StatusCode, header::AUTHORIZATION};

/// Raw bearer credential taken from the `Authorization` header.
///
/// Returns 401 if the header is absent, is not valid UTF-8, does not use the
/// `Bearer` scheme (matched case-insensitively) or carries an empty token.
/// The token itself is not validated here.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerRejection {
    #[error("authorization header required")]
    Missing,
    #[error("invalid authorization header")]
    Malformed,
}

impl IntoResponse for BearerRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "AUTHENTICATION_REQUIRED",
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Split an `Authorization` header value into its bearer token.
pub fn parse_authorization(value: &str) -> Result<&str, BearerRejection> {
    let (scheme, token) = value.split_once(' ').ok_or(BearerRejection::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerRejection::Malformed);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(BearerRejection::Malformed);
    }
    Ok(token)
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = BearerRejection;

    // Same shape as axum-core's declaration (`fn -> impl Future + Send`): read the
    // header synchronously and return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match parts.headers.get(AUTHORIZATION) {
            None => Err(BearerRejection::Missing),
            Some(value) => value
                .to_str()
                .map_err(|_| BearerRejection::Malformed)
                .and_then(parse_authorization)
                .map(|token| Self(token.to_owned())),
        };

        async move { result }
    }
}
