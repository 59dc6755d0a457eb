use uuid::Uuid;

use crate::application::ports::song_repository::SongRepository;
use crate::application::use_cases::songs::{SongError, ensure_creator, load_song};
use crate::domain::songs::song::{Song, SongDraft};

pub struct UpdateSong<'a, R: SongRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SongRepository + ?Sized> UpdateSong<'a, R> {
    pub async fn execute(
        &self,
        song_id: Uuid,
        draft: SongDraft,
        user_id: Uuid,
    ) -> Result<Song, SongError> {
        let mut song = load_song(self.repo, song_id).await?;
        ensure_creator(&song, user_id, "edit it")?;
        song.apply(draft)?;
        if !self
            .repo
            .update_song(&song)
            .await
            .map_err(SongError::Storage)?
        {
            return Err(SongError::NotFound);
        }
        Ok(song)
    }
}
