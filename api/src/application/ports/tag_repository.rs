use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::songs::tag::Tag;

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// (name, usage count), most used first.
    async fn list_tags(&self, filter: Option<String>) -> anyhow::Result<Vec<(String, i64)>>;
    /// Returns the stored tag for a normalised name, creating it when missing.
    async fn upsert_tag(&self, name: &str) -> anyhow::Result<Tag>;
    async fn attach_to_song(&self, song_id: Uuid, tag_id: Uuid) -> anyhow::Result<()>;
    async fn detach_from_song(&self, song_id: Uuid, tag_id: Uuid) -> anyhow::Result<bool>;
}
