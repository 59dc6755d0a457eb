pub mod create_song;
pub mod delete_song;
pub mod get_song;
pub mod search_songs;
pub mod song_tags;
pub mod update_song;

use uuid::Uuid;

use crate::application::ports::song_repository::SongRepository;
use crate::domain::errors::DomainError;
use crate::domain::songs::song::Song;

#[derive(thiserror::Error, Debug)]
pub enum SongError {
    #[error("song not found")]
    NotFound,
    #[error("choir not found")]
    ChoirNotFound,
    #[error("only the song's creator can {action}")]
    NotCreator { action: &'static str },
    #[error("only choir members can {action}")]
    NotMember { action: &'static str },
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("song storage failed")]
    Storage(#[source] anyhow::Error),
}

async fn load_song<R: SongRepository + ?Sized>(repo: &R, id: Uuid) -> Result<Song, SongError> {
    repo.find_by_id(id)
        .await
        .map_err(SongError::Storage)?
        .ok_or(SongError::NotFound)
}

fn ensure_creator(song: &Song, user_id: Uuid, action: &'static str) -> Result<(), SongError> {
    if song.is_created_by(user_id) {
        Ok(())
    } else {
        Err(SongError::NotCreator { action })
    }
}
