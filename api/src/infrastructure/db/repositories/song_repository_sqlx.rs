use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::song_repository::{SongRepository, SongSearch};
use crate::domain::songs::song::Song;
use crate::domain::songs::tag::Tag;
use crate::infrastructure::db::PgPool;

/// Column list matching `map_song`, for queries aliasing songs as `s`.
pub(crate) const SONG_COLUMNS: &str =
    "s.id, s.title, s.composer, s.arranger, s.lyrics, s.created_by, s.created_at";

/// Tags come separately through `load_tags`.
pub(crate) fn map_song(r: &PgRow) -> Song {
    Song {
        id: r.get("id"),
        title: r.get("title"),
        composer: r.try_get("composer").ok().flatten(),
        arranger: r.try_get("arranger").ok().flatten(),
        lyrics: r.try_get("lyrics").ok().flatten(),
        tags: Vec::new(),
        created_by: r.try_get("created_by").ok().flatten(),
        created_at: r.get("created_at"),
    }
}

/// Fills `tags` on every song with one query.
pub(crate) async fn load_tags(pool: &PgPool, songs: &mut [Song]) -> anyhow::Result<()> {
    if songs.is_empty() {
        return Ok(());
    }
    let ids: Vec<Uuid> = songs.iter().map(|s| s.id).collect();
    let rows = sqlx::query(
        r#"SELECT st.song_id, t.id, t.name
           FROM song_tags st
           JOIN tags t ON t.id = st.tag_id
           WHERE st.song_id = ANY($1)
           ORDER BY t.name ASC"#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;
    let mut by_song: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for r in rows {
        by_song.entry(r.get("song_id")).or_default().push(Tag {
            id: r.get("id"),
            name: r.get("name"),
        });
    }
    for song in songs.iter_mut() {
        song.tags = by_song.remove(&song.id).unwrap_or_default();
    }
    Ok(())
}

fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub struct SqlxSongRepository {
    pub pool: PgPool,
}

impl SqlxSongRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongRepository for SqlxSongRepository {
    async fn insert_song(&self, song: &Song) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO songs (id, title, composer, arranger, lyrics, created_by, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(song.id)
        .bind(&song.title)
        .bind(song.composer.as_deref())
        .bind(song.arranger.as_deref())
        .bind(song.lyrics.as_deref())
        .bind(song.created_by)
        .bind(song.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Song>> {
        let row = sqlx::query(&format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut songs = [map_song(&row)];
        load_tags(&self.pool, &mut songs).await?;
        let [song] = songs;
        Ok(Some(song))
    }

    async fn update_song(&self, song: &Song) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE songs SET title = $2, composer = $3, arranger = $4, lyrics = $5
               WHERE id = $1"#,
        )
        .bind(song.id)
        .bind(&song.title)
        .bind(song.composer.as_deref())
        .bind(song.arranger.as_deref())
        .bind(song.lyrics.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_song(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn search(&self, search: &SongSearch) -> anyhow::Result<Vec<Song>> {
        let pattern = search.query.as_deref().map(like_pattern);
        let rows = sqlx::query(&format!(
            r#"SELECT {SONG_COLUMNS}
               FROM songs s
               WHERE NOT EXISTS (SELECT 1 FROM choir_songs cs WHERE cs.song_id = s.id)
                 AND ($1::text IS NULL
                      OR s.title ILIKE $1
                      OR s.composer ILIKE $1
                      OR s.arranger ILIKE $1)
                 AND ($2::text IS NULL OR EXISTS (
                      SELECT 1 FROM song_tags st
                      JOIN tags t ON t.id = st.tag_id
                      WHERE st.song_id = s.id AND t.name = $2))
               ORDER BY s.title ASC
               LIMIT $3"#
        ))
        .bind(pattern)
        .bind(search.tag.as_deref())
        .bind(search.limit)
        .fetch_all(&self.pool)
        .await?;
        let mut songs: Vec<Song> = rows.iter().map(map_song).collect();
        load_tags(&self.pool, &mut songs).await?;
        Ok(songs)
    }
}
