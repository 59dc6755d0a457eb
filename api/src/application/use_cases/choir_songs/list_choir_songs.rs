use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::application::use_cases::songs::SongError;
use crate::domain::songs::choir_song::ChoirSong;

pub struct ListChoirSongs<'a, C, CS>
where
    C: ChoirRepository + ?Sized,
    CS: ChoirSongRepository + ?Sized,
{
    pub choirs: &'a C,
    pub choir_songs: &'a CS,
}

impl<'a, C, CS> ListChoirSongs<'a, C, CS>
where
    C: ChoirRepository + ?Sized,
    CS: ChoirSongRepository + ?Sized,
{
    pub async fn execute(&self, choir_id: Uuid) -> Result<Vec<ChoirSong>, SongError> {
        if !self
            .choirs
            .exists(choir_id)
            .await
            .map_err(SongError::Storage)?
        {
            return Err(SongError::ChoirNotFound);
        }
        self.choir_songs
            .list_for_choir(choir_id)
            .await
            .map_err(SongError::Storage)
    }
}
