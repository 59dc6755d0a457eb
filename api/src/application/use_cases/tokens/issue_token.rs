use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::token_issuer::{IssuedToken, TokenIssuer};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::tokens::{TokenError, effective_role};

pub struct IssueToken<'a, U, C, T>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    T: TokenIssuer + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
    pub issuer: &'a T,
}

impl<'a, U, C, T> IssueToken<'a, U, C, T>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    T: TokenIssuer + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<IssuedToken, TokenError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(TokenError::Storage)?
            .ok_or(TokenError::NotFound)?;
        let administers = self
            .choirs
            .administers_any(user.id)
            .await
            .map_err(TokenError::Storage)?;
        let role = effective_role(user.role, administers);
        let token = self
            .issuer
            .issue(&user, role)
            .map_err(TokenError::Signing)?;
        tracing::debug!(user_id = %user.id, role = role.as_str(), "token_issued");
        Ok(token)
    }
}
