use uuid::Uuid;

use crate::application::dto::playlists::PlaylistSummaryDto;
use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::use_cases::playlists::PlaylistError;

pub struct ListChoirPlaylists<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub choirs: &'a C,
    pub playlists: &'a P,
}

impl<'a, C, P> ListChoirPlaylists<'a, C, P>
where
    C: ChoirRepository + ?Sized,
    P: PlaylistRepository + ?Sized,
{
    pub async fn execute(&self, choir_id: Uuid) -> Result<Vec<PlaylistSummaryDto>, PlaylistError> {
        if !self
            .choirs
            .exists(choir_id)
            .await
            .map_err(PlaylistError::Storage)?
        {
            return Err(PlaylistError::ChoirNotFound);
        }
        let rows = self
            .playlists
            .list_for_choir(choir_id)
            .await
            .map_err(PlaylistError::Storage)?;
        Ok(rows.into_iter().map(PlaylistSummaryDto::from).collect())
    }
}
