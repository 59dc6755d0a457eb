use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, optional_text, required_text};
use crate::domain::songs::tag::Tag;

pub const MAX_TITLE_LEN: usize = 200;

/// Editable fields of a song, validated as a unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongDraft {
    pub title: String,
    pub composer: Option<String>,
    pub arranger: Option<String>,
    pub lyrics: Option<String>,
}

impl SongDraft {
    pub fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: required_text("song title", &self.title, MAX_TITLE_LEN)?,
            composer: optional_text(self.composer),
            arranger: optional_text(self.arranger),
            lyrics: optional_text(self.lyrics),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arranger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Song {
    pub fn create(draft: SongDraft, created_by: Option<Uuid>) -> Result<Self, DomainError> {
        let draft = draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: draft.title,
            composer: draft.composer,
            arranger: draft.arranger,
            lyrics: draft.lyrics,
            tags: Vec::new(),
            created_by,
            created_at: Utc::now(),
        })
    }

    pub fn apply(&mut self, draft: SongDraft) -> Result<(), DomainError> {
        let draft = draft.validate()?;
        self.title = draft.title;
        self.composer = draft.composer;
        self.arranger = draft.arranger;
        self.lyrics = draft.lyrics;
        Ok(())
    }

    pub fn draft(&self) -> SongDraft {
        SongDraft {
            title: self.title.clone(),
            composer: self.composer.clone(),
            arranger: self.arranger.clone(),
            lyrics: self.lyrics.clone(),
        }
    }

    /// Songs without a recorded creator (imported library) are editable by nobody.
    pub fn is_created_by(&self, user_id: Uuid) -> bool {
        self.created_by == Some(user_id)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Returns false when the tag was already present. Tags stay sorted by name.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if self.has_tag(&tag.name) {
            return false;
        }
        self.tags.push(tag);
        self.tags.sort_by(|a, b| a.name.cmp(&b.name));
        true
    }

    pub fn remove_tag(&mut self, name: &str) -> Option<Tag> {
        let idx = self.tags.iter().position(|t| t.name == name)?;
        Some(self.tags.remove(idx))
    }
}
