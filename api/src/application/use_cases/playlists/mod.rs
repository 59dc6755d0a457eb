pub mod create_playlist;
pub mod delete_playlist;
pub mod get_playlist;
pub mod list_choir_playlists;
pub mod playlist_songs;
pub mod update_playlist;

use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::domain::errors::DomainError;
use crate::domain::playlists::playlist::Playlist;

#[derive(thiserror::Error, Debug)]
pub enum PlaylistError {
    #[error("playlist not found")]
    NotFound,
    #[error("choir not found")]
    ChoirNotFound,
    #[error("song not found")]
    SongNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("only choir members can {action}")]
    NotMember { action: &'static str },
    #[error("playlist was changed by someone else, try again")]
    Conflict,
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("playlist storage failed")]
    Storage(#[source] anyhow::Error),
}

async fn ensure_member<C: ChoirRepository + ?Sized>(
    choirs: &C,
    choir_id: Uuid,
    user_id: Uuid,
    action: &'static str,
) -> Result<(), PlaylistError> {
    if !choirs
        .is_member(choir_id, user_id)
        .await
        .map_err(PlaylistError::Storage)?
    {
        return Err(PlaylistError::NotMember { action });
    }
    Ok(())
}

async fn load_playlist<P: PlaylistRepository + ?Sized>(
    playlists: &P,
    playlist_id: Uuid,
) -> Result<Playlist, PlaylistError> {
    playlists
        .find_by_id(playlist_id)
        .await
        .map_err(PlaylistError::Storage)?
        .ok_or(PlaylistError::NotFound)
}

/// Loads a playlist the user may change.
async fn load_for_edit<C, P>(
    choirs: &C,
    playlists: &P,
    playlist_id: Uuid,
    user_id: Uuid,
    action: &'static str,
) -> Result<Playlist, PlaylistError>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    let playlist = load_playlist(playlists, playlist_id).await?;
    ensure_member(choirs, playlist.choir_id, user_id, action).await?;
    Ok(playlist)
}
