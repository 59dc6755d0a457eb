use uuid::Uuid;

use crate::application::ports::song_repository::SongRepository;
use crate::application::use_cases::songs::SongError;
use crate::domain::songs::song::{Song, SongDraft};

pub struct CreateSong<'a, R: SongRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SongRepository + ?Sized> CreateSong<'a, R> {
    pub async fn execute(&self, draft: SongDraft, creator_id: Uuid) -> Result<Song, SongError> {
        let song = Song::create(draft, Some(creator_id))?;
        self.repo
            .insert_song(&song)
            .await
            .map_err(SongError::Storage)?;
        tracing::info!(song_id = %song.id, "song_created");
        Ok(song)
    }
}
