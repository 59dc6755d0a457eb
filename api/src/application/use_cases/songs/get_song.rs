use uuid::Uuid;

use crate::application::ports::song_repository::SongRepository;
use crate::application::use_cases::songs::{SongError, load_song};
use crate::domain::songs::song::Song;

pub struct GetSong<'a, R: SongRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SongRepository + ?Sized> GetSong<'a, R> {
    pub async fn execute(&self, song_id: Uuid) -> Result<Song, SongError> {
        load_song(self.repo, song_id).await
    }
}
