use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::application::use_cases::choir_songs::ensure_member;
use crate::application::use_cases::songs::SongError;
use crate::domain::songs::choir_song::ChoirSong;

#[derive(Debug, Clone, Default)]
pub struct ChoirSongUpdate {
    pub key: Option<String>,
    pub notes: Option<String>,
    pub lyrics: Option<String>,
}

pub struct UpdateChoirSong<'a, C, CS>
where
    C: ChoirRepository + ?Sized,
    CS: ChoirSongRepository + ?Sized,
{
    pub choirs: &'a C,
    pub choir_songs: &'a CS,
}

impl<'a, C, CS> UpdateChoirSong<'a, C, CS>
where
    C: ChoirRepository + ?Sized,
    CS: ChoirSongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_song_id: Uuid,
        update: ChoirSongUpdate,
        editor_id: Uuid,
    ) -> Result<ChoirSong, SongError> {
        let mut choir_song = self
            .choir_songs
            .find_by_id(choir_song_id)
            .await
            .map_err(SongError::Storage)?
            .ok_or(SongError::NotFound)?;
        ensure_member(
            self.choirs,
            choir_song.choir_id,
            editor_id,
            "edit choir songs",
        )
        .await?;
        let mut draft = choir_song.song.draft();
        draft.lyrics = update.lyrics;
        choir_song.song.apply(draft)?;
        choir_song.set_arrangement(update.key, update.notes);
        if !self
            .choir_songs
            .update_choir_song(&choir_song)
            .await
            .map_err(SongError::Storage)?
        {
            return Err(SongError::NotFound);
        }
        Ok(choir_song)
    }
}
