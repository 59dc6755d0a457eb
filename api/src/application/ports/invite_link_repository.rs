use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::invitations::invite_link::InviteLink;

#[async_trait]
pub trait InviteLinkRepository: Send + Sync {
    async fn insert_link(&self, link: &InviteLink) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<InviteLink>>;
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<InviteLink>>;
    /// Newest first, inactive links included.
    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<InviteLink>>;
    async fn deactivate(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Counts one use and adds `user_id` to the link's choir in one transaction,
    /// provided the link is still usable at `now`. Returns false, changing
    /// nothing, otherwise.
    async fn redeem(&self, id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> anyhow::Result<bool>;
}
