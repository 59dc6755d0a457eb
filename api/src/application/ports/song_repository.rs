use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::songs::song::Song;

#[derive(Debug, Clone, Default)]
pub struct SongSearch {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub limit: i64,
}

/// Library (master) songs. Choir arrangements live in `ChoirSongRepository`.
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn insert_song(&self, song: &Song) -> anyhow::Result<()>;
    /// Finds any song, including choir arrangements, with its tags.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Song>>;
    async fn update_song(&self, song: &Song) -> anyhow::Result<bool>;
    async fn delete_song(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn search(&self, search: &SongSearch) -> anyhow::Result<Vec<Song>>;
}
