use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::playlists::playlist::Playlist;

#[derive(Debug, Clone)]
pub struct PlaylistSummaryRow {
    pub id: Uuid,
    pub choir_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub song_count: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn insert_playlist(&self, playlist: &Playlist) -> anyhow::Result<()>;
    /// Loads the playlist with songs in their stored order.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Playlist>>;
    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<PlaylistSummaryRow>>;
    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<bool>;
    /// Replaces the whole ordered song list with `song_ids`, but only while the
    /// stored order still equals `expected`. Returns false, writing nothing, when
    /// it has changed or the playlist is gone.
    async fn replace_songs(
        &self,
        id: Uuid,
        expected: &[Uuid],
        song_ids: &[Uuid],
    ) -> anyhow::Result<bool>;
    async fn delete_playlist(&self, id: Uuid) -> anyhow::Result<bool>;
}
