use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, optional_text, required_text};
use crate::domain::songs::song::Song;
use crate::domain::users::user::User;

pub const MAX_PLAYLIST_NAME_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,
    pub choir_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Performance order. Index 0 is sung first.
    pub songs: Vec<Song>,
    pub created_by: User,
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    pub fn create(
        choir_id: Uuid,
        name: &str,
        description: Option<String>,
        created_by: User,
    ) -> Result<Self, DomainError> {
        if choir_id.is_nil() {
            return Err(DomainError::Empty { field: "choir id" });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            choir_id,
            name: required_text("playlist name", name, MAX_PLAYLIST_NAME_LEN)?,
            description: optional_text(description),
            songs: Vec::new(),
            created_by,
            created_at: Utc::now(),
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = required_text("playlist name", name, MAX_PLAYLIST_NAME_LEN)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = optional_text(description);
    }

    pub fn position_of(&self, song_id: Uuid) -> Option<usize> {
        self.songs.iter().position(|s| s.id == song_id)
    }

    pub fn song_ids(&self) -> Vec<Uuid> {
        self.songs.iter().map(|s| s.id).collect()
    }

    /// Inserts at `position` (clamped to the end) or appends. Returns the final index.
    pub fn add_song(&mut self, song: Song, position: Option<usize>) -> Result<usize, DomainError> {
        if self.position_of(song.id).is_some() {
            return Err(DomainError::DuplicateSong);
        }
        let idx = position
            .unwrap_or(self.songs.len())
            .min(self.songs.len());
        self.songs.insert(idx, song);
        Ok(idx)
    }

    pub fn remove_song(&mut self, song_id: Uuid) -> Result<Song, DomainError> {
        let idx = self
            .position_of(song_id)
            .ok_or(DomainError::SongNotInPlaylist)?;
        Ok(self.songs.remove(idx))
    }

    /// Moves a song so that it ends up at `new_position` (clamped to the last index).
    pub fn move_song(&mut self, song_id: Uuid, new_position: usize) -> Result<usize, DomainError> {
        let from = self
            .position_of(song_id)
            .ok_or(DomainError::SongNotInPlaylist)?;
        let song = self.songs.remove(from);
        let to = new_position.min(self.songs.len());
        self.songs.insert(to, song);
        Ok(to)
    }
}
