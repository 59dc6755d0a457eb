use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::application::ports::song_repository::SongRepository;
use crate::application::use_cases::choir_songs::ensure_member;
use crate::application::use_cases::songs::SongError;
use crate::domain::songs::choir_song::ChoirSong;
use crate::domain::songs::song::SongDraft;

/// Fields for a choir arrangement. With a base song, unset fields keep the base values.
#[derive(Debug, Clone, Default)]
pub struct ChoirSongInput {
    pub title: Option<String>,
    pub composer: Option<String>,
    pub arranger: Option<String>,
    pub lyrics: Option<String>,
    pub key: Option<String>,
    pub notes: Option<String>,
}

impl ChoirSongInput {
    fn overlay(&self, base: SongDraft) -> SongDraft {
        SongDraft {
            title: self.title.clone().unwrap_or(base.title),
            composer: self.composer.clone().or(base.composer),
            arranger: self.arranger.clone().or(base.arranger),
            lyrics: self.lyrics.clone().or(base.lyrics),
        }
    }
}

pub struct CreateChoirSong<'a, C, S, CS>
where
    C: ChoirRepository + ?Sized,
    S: SongRepository + ?Sized,
    CS: ChoirSongRepository + ?Sized,
{
    pub choirs: &'a C,
    pub songs: &'a S,
    pub choir_songs: &'a CS,
}

impl<'a, C, S, CS> CreateChoirSong<'a, C, S, CS>
where
    C: ChoirRepository + ?Sized,
    S: SongRepository + ?Sized,
    CS: ChoirSongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        base_song_id: Option<Uuid>,
        input: ChoirSongInput,
        editor_id: Uuid,
    ) -> Result<ChoirSong, SongError> {
        ensure_member(self.choirs, choir_id, editor_id, "add choir songs").await?;
        let mut choir_song = match base_song_id {
            Some(base_id) => {
                let base = self
                    .songs
                    .find_by_id(base_id)
                    .await
                    .map_err(SongError::Storage)?
                    .ok_or(SongError::NotFound)?;
                let mut copy = ChoirSong::copy_of(&base, choir_id, editor_id)?;
                copy.song.apply(input.overlay(base.draft()))?;
                copy
            }
            None => ChoirSong::create(
                input.overlay(SongDraft::default()),
                choir_id,
                editor_id,
                None,
                None,
            )?,
        };
        choir_song.set_arrangement(input.key, input.notes);
        self.choir_songs
            .insert_choir_song(&choir_song)
            .await
            .map_err(SongError::Storage)?;
        tracing::info!(
            choir_id = %choir_id,
            song_id = %choir_song.id(),
            base_song_id = ?choir_song.base_song_id,
            "choir_song_created"
        );
        Ok(choir_song)
    }
}
