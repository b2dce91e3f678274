//! JWT issuance and validation.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind, get_current_timestamp,
};
use serde::{Deserialize, Serialize};

use petmatch_domain::id::UserId;
use petmatch_domain::user::Role;

/// Token lifetime in seconds (24 hours), counted from issuance.
pub const TOKEN_LIFETIME_SECS: u64 = 86_400;

/// Errors returned by [`issue_token`] and [`validate_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id as a decimal string |
/// | `role` | custom | `adopter` / `shelter` / `admin` |
/// | `name` | custom | display name at issuance |
/// | `email` | custom | folded email at issuance |
/// | `iat` | `iat` | issued-at, seconds since epoch |
/// | `exp` | `exp` | expiry, seconds since epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

/// The account a token is issued for.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: UserId,
    pub role: Role,
    pub name: &'a str,
    pub email: &'a str,
}

/// Identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub role: Role,
    pub expires_at: u64,
}

/// Sign an HS256 token for `subject`, valid for [`TOKEN_LIFETIME_SECS`].
///
/// Returns the encoded token and its expiry timestamp.
pub fn issue_token(subject: &TokenSubject<'_>, secret: &str) -> Result<(String, u64), TokenError> {
    issue_token_at(subject, secret, get_current_timestamp())
}

/// Like [`issue_token`] with an explicit issued-at timestamp.
pub fn issue_token_at(
    subject: &TokenSubject<'_>,
    secret: &str,
    issued_at: u64,
) -> Result<(String, u64), TokenError> {
    let exp = issued_at + TOKEN_LIFETIME_SECS;
    let claims = JwtClaims {
        sub: subject.user_id.to_string(),
        role: subject.role,
        name: subject.name.to_owned(),
        email: subject.email.to_owned(),
        iat: issued_at,
        exp,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)?;
    Ok((token, exp))
}

/// Decode and validate a token, returning its raw claims.
///
/// Validation: HS256 only, `exp` checked, required claims `exp` + `sub`.
/// Default leeway = 60s.
pub fn decode_claims(token: &str, secret: &str) -> Result<JwtClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the identity it carries.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let claims = decode_claims(token, secret)?;
    let user_id = claims
        .sub
        .parse::<UserId>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        role: claims.role,
        expires_at: claims.exp,
    })
}
