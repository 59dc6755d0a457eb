use crate::application::ports::token_issuer::{TokenClaims, TokenIssuer};
use crate::application::use_cases::tokens::TokenError;

pub struct ValidateToken<'a, T: TokenIssuer + ?Sized> {
    pub issuer: &'a T,
}

impl<'a, T: TokenIssuer + ?Sized> ValidateToken<'a, T> {
    pub fn execute(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        self.issuer
            .validate(token)
            .map_err(TokenError::InvalidToken)
    }
}
