use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::UserError;
use crate::domain::users::user::User;

/// Resolves the user behind an identity-provider login, creating it on first sight.
pub struct FindOrCreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> FindOrCreateUser<'a, R> {
    pub async fn execute(
        &self,
        external_id: &str,
        name: &str,
        email: &str,
    ) -> Result<User, UserError> {
        if let Some(user) = self
            .repo
            .find_by_external_id(external_id)
            .await
            .map_err(UserError::Storage)?
        {
            return Ok(user);
        }
        let user = User::create(Some(external_id), name, email)?;
        // Accounts created before external ids were recorded match by email.
        if let Some(existing) = self
            .repo
            .find_by_email(&user.email)
            .await
            .map_err(UserError::Storage)?
        {
            return Ok(existing);
        }
        self.repo
            .insert_user(&user)
            .await
            .map_err(UserError::Storage)?;
        tracing::info!(user_id = %user.id, "user_created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;

    #[tokio::test]
    async fn creates_once_then_returns_the_same_user() {
        let store = InMemoryStore::new();
        let uc = FindOrCreateUser { repo: &store };
        let first = uc
            .execute("google-1", "Ana", "Ana@Example.com")
            .await
            .unwrap();
        assert_eq!(first.email, "ana@example.com");
        assert!(first.is_new());

        let again = uc
            .execute("google-1", "Ana Renamed", "ana@example.com")
            .await
            .unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.name, "Ana");
    }

    #[tokio::test]
    async fn matches_existing_account_by_email() {
        let store = InMemoryStore::new();
        let seeded = store.seed_user("Luis");
        let uc = FindOrCreateUser { repo: &store };
        let found = uc
            .execute("other-provider-id", "Luis", &seeded.email.to_uppercase())
            .await
            .unwrap();
        assert_eq!(found.id, seeded.id);
    }

    #[tokio::test]
    async fn rejects_invalid_email() {
        let store = InMemoryStore::new();
        let uc = FindOrCreateUser { repo: &store };
        let err = uc.execute("g", "Ana", "not-an-email").await.unwrap_err();
        assert!(matches!(err, UserError::Invalid(_)));
    }
}
