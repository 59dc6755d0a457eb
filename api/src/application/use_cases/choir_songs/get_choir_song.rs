use uuid::Uuid;

use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::application::use_cases::songs::SongError;
use crate::domain::songs::choir_song::ChoirSong;

pub struct GetChoirSong<'a, R: ChoirSongRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ChoirSongRepository + ?Sized> GetChoirSong<'a, R> {
    pub async fn execute(&self, choir_song_id: Uuid) -> Result<ChoirSong, SongError> {
        self.repo
            .find_by_id(choir_song_id)
            .await
            .map_err(SongError::Storage)?
            .ok_or(SongError::NotFound)
    }
}
