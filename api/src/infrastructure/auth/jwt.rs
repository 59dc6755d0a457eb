use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::application::ports::token_issuer::{IssuedToken, TokenClaims, TokenIssuer};
use crate::bootstrap::config::Config;
use crate::domain::users::user::{User, UserRole};

/// HS256 tokens bound to the configured issuer and audience.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &str, issuer: &str, audience: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            &cfg.jwt_secret,
            &cfg.jwt_issuer,
            &cfg.jwt_audience,
            cfg.jwt_expires_secs,
        )
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &User, role: UserRole) -> anyhow::Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: role.as_str().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let access_token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    fn validate(&self, token: &str) -> anyhow::Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
