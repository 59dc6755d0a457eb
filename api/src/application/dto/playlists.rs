use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::playlist_repository::PlaylistSummaryRow;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummaryDto {
    pub id: Uuid,
    pub choir_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub song_count: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<PlaylistSummaryRow> for PlaylistSummaryDto {
    fn from(r: PlaylistSummaryRow) -> Self {
        Self {
            id: r.id,
            choir_id: r.choir_id,
            name: r.name,
            description: r.description,
            song_count: r.song_count,
            created_by: r.created_by,
            created_at: r.created_at,
        }
    }
}
