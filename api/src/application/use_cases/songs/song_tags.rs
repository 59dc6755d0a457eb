use uuid::Uuid;

use crate::application::ports::song_repository::SongRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::use_cases::songs::{SongError, ensure_creator, load_song};
use crate::domain::songs::song::Song;
use crate::domain::songs::tag::normalize_tag_name;

pub struct AddTag<'a, S, T>
where
    S: SongRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    pub songs: &'a S,
    pub tags: &'a T,
}

impl<'a, S, T> AddTag<'a, S, T>
where
    S: SongRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    /// Adding a tag the song already carries is a no-op.
    pub async fn execute(
        &self,
        song_id: Uuid,
        tag_name: &str,
        user_id: Uuid,
    ) -> Result<Song, SongError> {
        let name = normalize_tag_name(tag_name)?;
        let mut song = load_song(self.songs, song_id).await?;
        ensure_creator(&song, user_id, "tag it")?;
        if song.has_tag(&name) {
            return Ok(song);
        }
        let tag = self
            .tags
            .upsert_tag(&name)
            .await
            .map_err(SongError::Storage)?;
        self.tags
            .attach_to_song(song.id, tag.id)
            .await
            .map_err(SongError::Storage)?;
        song.add_tag(tag);
        Ok(song)
    }
}

pub struct RemoveTag<'a, S, T>
where
    S: SongRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    pub songs: &'a S,
    pub tags: &'a T,
}

impl<'a, S, T> RemoveTag<'a, S, T>
where
    S: SongRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    pub async fn execute(
        &self,
        song_id: Uuid,
        tag_name: &str,
        user_id: Uuid,
    ) -> Result<Song, SongError> {
        let name = normalize_tag_name(tag_name)?;
        let mut song = load_song(self.songs, song_id).await?;
        ensure_creator(&song, user_id, "untag it")?;
        if let Some(tag) = song.remove_tag(&name) {
            self.tags
                .detach_from_song(song.id, tag.id)
                .await
                .map_err(SongError::Storage)?;
        }
        Ok(song)
    }
}
