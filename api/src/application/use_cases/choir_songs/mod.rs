pub mod create_choir_song;
pub mod get_choir_song;
pub mod list_choir_songs;
pub mod update_choir_song;

use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::use_cases::songs::SongError;

async fn ensure_member<C: ChoirRepository + ?Sized>(
    choirs: &C,
    choir_id: Uuid,
    user_id: Uuid,
    action: &'static str,
) -> Result<(), SongError> {
    if !choirs.exists(choir_id).await.map_err(SongError::Storage)? {
        return Err(SongError::ChoirNotFound);
    }
    if !choirs
        .is_member(choir_id, user_id)
        .await
        .map_err(SongError::Storage)?
    {
        return Err(SongError::NotMember { action });
    }
    Ok(())
}
