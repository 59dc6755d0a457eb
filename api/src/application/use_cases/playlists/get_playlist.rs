use uuid::Uuid;

use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::use_cases::playlists::{PlaylistError, load_playlist};
use crate::domain::playlists::playlist::Playlist;

pub struct GetPlaylist<'a, R: PlaylistRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PlaylistRepository + ?Sized> GetPlaylist<'a, R> {
    pub async fn execute(&self, playlist_id: Uuid) -> Result<Playlist, PlaylistError> {
        load_playlist(self.repo, playlist_id).await
    }
}
