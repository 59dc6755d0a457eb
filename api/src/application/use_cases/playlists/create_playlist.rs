use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::playlists::{PlaylistError, ensure_member};
use crate::domain::playlists::playlist::Playlist;

pub struct CreatePlaylist<'a, U, C, P>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
    pub playlists: &'a P,
}

impl<'a, U, C, P> CreatePlaylist<'a, U, C, P>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        name: &str,
        description: Option<String>,
        creator_id: Uuid,
    ) -> Result<Playlist, PlaylistError> {
        if !self
            .choirs
            .exists(choir_id)
            .await
            .map_err(PlaylistError::Storage)?
        {
            return Err(PlaylistError::ChoirNotFound);
        }
        ensure_member(self.choirs, choir_id, creator_id, "create playlists").await?;
        let creator = self
            .users
            .find_by_id(creator_id)
            .await
            .map_err(PlaylistError::Storage)?
            .ok_or(PlaylistError::UserNotFound)?;
        let playlist = Playlist::create(choir_id, name, description, creator)?;
        self.playlists
            .insert_playlist(&playlist)
            .await
            .map_err(PlaylistError::Storage)?;
        tracing::info!(playlist_id = %playlist.id, choir_id = %choir_id, "playlist_created");
        Ok(playlist)
    }
}
