//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs tokens with the same claims a real login issues, so tests
//! can act as any account, including a deleted one, without going through `/auth/login`.

use petmatch_auth_types::token::{TokenSubject, issue_token, issue_token_at};
use petmatch_domain::id::UserId;
use petmatch_domain::user::Role;

/// Identity to mint tokens for.
pub struct MockAuth {
    pub user_id: UserId,
    pub role: Role,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: UserId, role: Role, secret: &str) -> Self {
        Self {
            user_id,
            role,
            secret: secret.to_owned(),
        }
    }

    fn subject(&self) -> TokenSubject<'_> {
        TokenSubject {
            user_id: self.user_id,
            role: self.role,
            name: "Test User",
            email: "test@example.com",
        }
    }

    /// A currently valid token.
    pub fn token(&self) -> String {
        issue_token(&self.subject(), &self.secret).unwrap().0
    }

    /// A token whose lifetime ended long ago.
    pub fn expired_token(&self) -> String {
        issue_token_at(&self.subject(), &self.secret, 1_000).unwrap().0
    }
}
