use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::choirs::choir::Choir;

#[async_trait]
pub trait ChoirRepository: Send + Sync {
    /// Stores the choir together with its initial member list. A taken name
    /// fails with [`UniqueViolation`](crate::application::ports::conflict::UniqueViolation).
    async fn insert_choir(&self, choir: &Choir) -> anyhow::Result<()>;
    /// Loads the choir with its members.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Choir>>;
    async fn list_for_member(&self, user_id: Uuid) -> anyhow::Result<Vec<Choir>>;
    /// Fails with `UniqueViolation` when another choir already uses `name`.
    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<bool>;
    async fn delete_choir(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn add_member(&self, choir_id: Uuid, user_id: Uuid, is_admin: bool)
    -> anyhow::Result<()>;
    async fn remove_member(&self, choir_id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
    /// Returns false when the user is not a member.
    async fn set_member_admin(
        &self,
        choir_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<bool>;
    async fn exists(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn is_member(&self, choir_id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
    /// `name` is whitespace-normalised; the store compares it case-insensitively.
    async fn name_exists(&self, name: &str) -> anyhow::Result<bool>;
    async fn administers_any(&self, user_id: Uuid) -> anyhow::Result<bool>;
}
