use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::users::user::{User, UserRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User, role: UserRole) -> anyhow::Result<IssuedToken>;
    fn validate(&self, token: &str) -> anyhow::Result<TokenClaims>;
}
