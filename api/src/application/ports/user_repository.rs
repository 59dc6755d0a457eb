use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &User) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<User>>;
    /// Persists role and onboarding state. Returns false when the user is gone.
    async fn save_profile(&self, user: &User) -> anyhow::Result<bool>;
}
