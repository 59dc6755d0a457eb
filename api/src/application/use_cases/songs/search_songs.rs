use crate::application::ports::song_repository::{SongRepository, SongSearch};
use crate::application::use_cases::songs::SongError;
use crate::domain::songs::song::Song;
use crate::domain::songs::tag::normalize_tag_name;

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const MAX_SEARCH_LIMIT: i64 = 100;

pub struct SearchSongs<'a, R: SongRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SongRepository + ?Sized> SearchSongs<'a, R> {
    pub async fn execute(
        &self,
        query: Option<String>,
        tag: Option<String>,
        limit: Option<i64>,
    ) -> Result<Vec<Song>, SongError> {
        let search = SongSearch {
            query: query
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            // An unusable tag filter is ignored rather than matching nothing.
            tag: tag.and_then(|t| normalize_tag_name(&t).ok()),
            limit: limit
                .unwrap_or(DEFAULT_SEARCH_LIMIT)
                .clamp(1, MAX_SEARCH_LIMIT),
        };
        self.repo.search(&search).await.map_err(SongError::Storage)
    }
}
