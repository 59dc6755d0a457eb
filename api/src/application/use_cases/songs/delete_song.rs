use uuid::Uuid;

use crate::application::ports::song_repository::SongRepository;
use crate::application::use_cases::songs::{SongError, ensure_creator, load_song};

pub struct DeleteSong<'a, R: SongRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SongRepository + ?Sized> DeleteSong<'a, R> {
    pub async fn execute(&self, song_id: Uuid, user_id: Uuid) -> Result<(), SongError> {
        let song = load_song(self.repo, song_id).await?;
        ensure_creator(&song, user_id, "delete it")?;
        if !self
            .repo
            .delete_song(song.id)
            .await
            .map_err(SongError::Storage)?
        {
            return Err(SongError::NotFound);
        }
        tracing::info!(song_id = %song.id, "song_deleted");
        Ok(())
    }
}
