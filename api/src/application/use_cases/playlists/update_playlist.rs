use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::use_cases::playlists::{PlaylistError, load_for_edit};
use crate::domain::playlists::playlist::Playlist;

pub struct UpdatePlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub choirs: &'a C,
    pub playlists: &'a P,
}

impl<'a, C, P> UpdatePlaylist<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub async fn execute(
        &self,
        playlist_id: Uuid,
        name: &str,
        description: Option<String>,
        user_id: Uuid,
    ) -> Result<Playlist, PlaylistError> {
        let mut playlist = load_for_edit(
            self.choirs,
            self.playlists,
            playlist_id,
            user_id,
            "edit playlists",
        )
        .await?;
        playlist.rename(name)?;
        playlist.set_description(description);
        if !self
            .playlists
            .update_details(playlist.id, &playlist.name, playlist.description.as_deref())
            .await
            .map_err(PlaylistError::Storage)?
        {
            return Err(PlaylistError::NotFound);
        }
        Ok(playlist)
    }
}
