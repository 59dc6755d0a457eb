use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, optional_text};
use crate::domain::songs::song::{Song, SongDraft};

/// A choir's own arrangement of a song: the song fields plus performance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoirSong {
    #[serde(flatten)]
    pub song: Song,
    pub choir_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_song_id: Option<Uuid>,
}

impl ChoirSong {
    pub fn create(
        draft: SongDraft,
        choir_id: Uuid,
        editor: Uuid,
        key: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        if choir_id.is_nil() {
            return Err(DomainError::Empty { field: "choir id" });
        }
        Ok(Self {
            song: Song::create(draft, Some(editor))?,
            choir_id,
            key: optional_text(key),
            notes: optional_text(notes),
            base_song_id: None,
        })
    }

    /// Copies `base` into the choir. The copy gets its own id, keeps the base
    /// tags and remembers where it came from.
    pub fn copy_of(base: &Song, choir_id: Uuid, editor: Uuid) -> Result<Self, DomainError> {
        let mut copy = Self::create(base.draft(), choir_id, editor, None, None)?;
        copy.song.tags = base.tags.clone();
        copy.base_song_id = Some(base.id);
        Ok(copy)
    }

    pub fn id(&self) -> Uuid {
        self.song.id
    }

    pub fn set_arrangement(&mut self, key: Option<String>, notes: Option<String>) {
        self.key = optional_text(key);
        self.notes = optional_text(notes);
    }
}
