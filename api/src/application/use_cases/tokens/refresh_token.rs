use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::token_issuer::{IssuedToken, TokenIssuer};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::tokens::TokenError;
use crate::application::use_cases::tokens::issue_token::IssueToken;
use crate::application::use_cases::tokens::validate_token::ValidateToken;

/// Re-issues a still valid token with the user's current effective role.
pub struct RefreshToken<'a, U, C, T>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    T: TokenIssuer + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
    pub issuer: &'a T,
}

impl<'a, U, C, T> RefreshToken<'a, U, C, T>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    T: TokenIssuer + ?Sized,
{
    pub async fn execute(&self, token: &str) -> Result<IssuedToken, TokenError> {
        let claims = ValidateToken {
            issuer: self.issuer,
        }
        .execute(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| TokenError::InvalidToken(anyhow::Error::new(e)))?;
        IssueToken {
            users: self.users,
            choirs: self.choirs,
            issuer: self.issuer,
        }
        .execute(user_id)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::user::UserRole;
    use crate::test_support::{InMemoryStore, StaticTokenIssuer};

    #[tokio::test]
    async fn refresh_picks_up_new_admin_role() {
        let store = InMemoryStore::new();
        let user = store.seed_user("Sofia");
        let old = StaticTokenIssuer.issue(&user, UserRole::General).unwrap();
        store.seed_choir("Cantores", &user);

        let uc = RefreshToken {
            users: &store,
            choirs: &store,
            issuer: &StaticTokenIssuer,
        };
        let fresh = uc.execute(&old.access_token).await.unwrap();
        let claims = StaticTokenIssuer.validate(&fresh.access_token).unwrap();
        assert_eq!(claims.role, "choirAdmin");
    }

    #[tokio::test]
    async fn refresh_for_deleted_user_fails() {
        let store = InMemoryStore::new();
        let ghost = crate::domain::users::user::User::create(None, "Ghost", "ghost@choir.test")
            .unwrap();
        let old = StaticTokenIssuer.issue(&ghost, UserRole::General).unwrap();
        let uc = RefreshToken {
            users: &store,
            choirs: &store,
            issuer: &StaticTokenIssuer,
        };
        assert!(matches!(
            uc.execute(&old.access_token).await,
            Err(TokenError::NotFound)
        ));
    }
}
