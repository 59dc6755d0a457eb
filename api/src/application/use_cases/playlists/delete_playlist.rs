use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::use_cases::playlists::{PlaylistError, load_for_edit};

pub struct DeletePlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub choirs: &'a C,
    pub playlists: &'a P,
}

impl<'a, C, P> DeletePlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub async fn execute(&self, playlist_id: Uuid, user_id: Uuid) -> Result<(), PlaylistError> {
        let playlist = load_for_edit(
            self.choirs,
            self.playlists,
            playlist_id,
            user_id,
            "delete playlists",
        )
        .await?;
        if !self
            .playlists
            .delete_playlist(playlist.id)
            .await
            .map_err(PlaylistError::Storage)?
        {
            return Err(PlaylistError::NotFound);
        }
        tracing::info!(playlist_id = %playlist.id, "playlist_deleted");
        Ok(())
    }
}
