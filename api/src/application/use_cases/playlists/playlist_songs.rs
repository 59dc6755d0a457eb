use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::ports::song_repository::SongRepository;
use crate::application::use_cases::playlists::{PlaylistError, load_for_edit};
use crate::domain::errors::DomainError;
use crate::domain::playlists::playlist::Playlist;

const MAX_EDIT_ATTEMPTS: usize = 3;

/// Applies `edit` to the freshly loaded playlist and stores the new order only
/// if nobody changed it in between; otherwise reloads and applies it again.
async fn edit_songs<C, P, T, F>(
    choirs: &C,
    playlists: &P,
    playlist_id: Uuid,
    user_id: Uuid,
    action: &'static str,
    mut edit: F,
) -> Result<(Playlist, T), PlaylistError>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
    F: FnMut(&mut Playlist) -> Result<T, DomainError>,
{
    for attempt in 1..=MAX_EDIT_ATTEMPTS {
        let mut playlist = load_for_edit(choirs, playlists, playlist_id, user_id, action).await?;
        let expected = playlist.song_ids();
        let outcome = edit(&mut playlist)?;
        if playlists
            .replace_songs(playlist.id, &expected, &playlist.song_ids())
            .await
            .map_err(PlaylistError::Storage)?
        {
            return Ok((playlist, outcome));
        }
        tracing::debug!(playlist_id = %playlist_id, attempt, "playlist_edit_conflict");
    }
    tracing::warn!(playlist_id = %playlist_id, "playlist_edit_gave_up");
    Err(PlaylistError::Conflict)
}

pub struct AddSongToPlaylist<'a, C, P, S>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
    S: SongRepository + ?Sized,
{
    pub choirs: &'a C,
    pub playlists: &'a P,
    pub songs: &'a S,
}

impl<'a, C, P, S> AddSongToPlaylist<'a, C, P, S>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
    S: SongRepository + ?Sized,
{
    /// Appends when `position` is `None`; positions past the end append too.
    pub async fn execute(
        &self,
        playlist_id: Uuid,
        song_id: Uuid,
        position: Option<usize>,
        user_id: Uuid,
    ) -> Result<Playlist, PlaylistError> {
        let song = self
            .songs
            .find_by_id(song_id)
            .await
            .map_err(PlaylistError::Storage)?
            .ok_or(PlaylistError::SongNotFound)?;
        let (playlist, at) = edit_songs(
            self.choirs,
            self.playlists,
            playlist_id,
            user_id,
            "edit playlists",
            |p| p.add_song(song.clone(), position),
        )
        .await?;
        tracing::debug!(
            playlist_id = %playlist.id,
            song_id = %song_id,
            position = at,
            "playlist_song_added"
        );
        Ok(playlist)
    }
}

pub struct RemoveSongFromPlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub choirs: &'a C,
    pub playlists: &'a P,
}

impl<'a, C, P> RemoveSongFromPlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub async fn execute(
        &self,
        playlist_id: Uuid,
        song_id: Uuid,
        user_id: Uuid,
    ) -> Result<Playlist, PlaylistError> {
        let (playlist, _) = edit_songs(
            self.choirs,
            self.playlists,
            playlist_id,
            user_id,
            "edit playlists",
            |p| p.remove_song(song_id),
        )
        .await?;
        Ok(playlist)
    }
}

pub struct MoveSongInPlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub choirs: &'a C,
    pub playlists: &'a P,
}

impl<'a, C, P> MoveSongInPlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub async fn execute(
        &self,
        playlist_id: Uuid,
        song_id: Uuid,
        new_position: usize,
        user_id: Uuid,
    ) -> Result<Playlist, PlaylistError> {
        let (playlist, _) = edit_songs(
            self.choirs,
            self.playlists,
            playlist_id,
            user_id,
            "reorder playlists",
            |p| p.move_song(song_id, new_position),
        )
        .await?;
        Ok(playlist)
    }
}
