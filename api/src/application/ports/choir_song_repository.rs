use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::songs::choir_song::ChoirSong;

#[async_trait]
pub trait ChoirSongRepository: Send + Sync {
    /// Stores the song row, its choir metadata and its tag links.
    async fn insert_choir_song(&self, song: &ChoirSong) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ChoirSong>>;
    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<ChoirSong>>;
    async fn update_choir_song(&self, song: &ChoirSong) -> anyhow::Result<bool>;
}
