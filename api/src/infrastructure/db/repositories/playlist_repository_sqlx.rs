use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::playlist_repository::{PlaylistRepository, PlaylistSummaryRow};
use crate::domain::playlists::playlist::Playlist;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::song_repository_sqlx::{
    SONG_COLUMNS, load_tags, map_song,
};
use crate::infrastructure::db::repositories::user_repository_sqlx::{USER_COLUMNS, map_user};

pub struct SqlxPlaylistRepository {
    pub pool: PgPool,
}

impl SqlxPlaylistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistRepository for SqlxPlaylistRepository {
    async fn insert_playlist(&self, playlist: &Playlist) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"INSERT INTO playlists (id, choir_id, name, description, created_by, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(playlist.id)
        .bind(playlist.choir_id)
        .bind(&playlist.name)
        .bind(playlist.description.as_deref())
        .bind(playlist.created_by.id)
        .bind(playlist.created_at)
        .execute(&mut *tx)
        .await?;
        for (position, song) in playlist.songs.iter().enumerate() {
            sqlx::query(
                "INSERT INTO playlist_songs (playlist_id, song_id, position) VALUES ($1, $2, $3)",
            )
            .bind(playlist.id)
            .bind(song.id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Playlist>> {
        let Some(head) = sqlx::query(&format!(
            r#"SELECT p.id AS playlist_id, p.choir_id, p.name AS playlist_name,
                      p.description, p.created_at AS playlist_created_at, {USER_COLUMNS}
               FROM playlists p
               JOIN users u ON u.id = p.created_by
               WHERE p.id = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };
        let song_rows = sqlx::query(&format!(
            r#"SELECT {SONG_COLUMNS}
               FROM playlist_songs ps
               JOIN songs s ON s.id = ps.song_id
               WHERE ps.playlist_id = $1
               ORDER BY ps.position ASC"#
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let mut songs: Vec<_> = song_rows.iter().map(map_song).collect();
        load_tags(&self.pool, &mut songs).await?;
        Ok(Some(Playlist {
            id: head.get("playlist_id"),
            choir_id: head.get("choir_id"),
            name: head.get("playlist_name"),
            description: head.try_get("description").ok().flatten(),
            songs,
            created_by: map_user(&head),
            created_at: head.get("playlist_created_at"),
        }))
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<PlaylistSummaryRow>> {
        let rows = sqlx::query(
            r#"SELECT p.id, p.choir_id, p.name, p.description, p.created_by, p.created_at,
                      COUNT(ps.song_id)::BIGINT AS song_count
               FROM playlists p
               LEFT JOIN playlist_songs ps ON ps.playlist_id = p.id
               WHERE p.choir_id = $1
               GROUP BY p.id
               ORDER BY p.created_at DESC"#,
        )
        .bind(choir_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| PlaylistSummaryRow {
                id: r.get("id"),
                choir_id: r.get("choir_id"),
                name: r.get("name"),
                description: r.try_get("description").ok().flatten(),
                song_count: r.get("song_count"),
                created_by: r.get("created_by"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE playlists SET name = $2, description = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn replace_songs(
        &self,
        id: Uuid,
        expected: &[Uuid],
        song_ids: &[Uuid],
    ) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        // Row lock held until commit
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM playlists WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(false);
        }
        let current: Vec<Uuid> = sqlx::query_scalar(
            "SELECT song_id FROM playlist_songs WHERE playlist_id = $1 ORDER BY position ASC",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        if current != expected {
            return Ok(false);
        }
        sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let positions: Vec<i32> = (0..song_ids.len() as i32).collect();
        sqlx::query(
            r#"INSERT INTO playlist_songs (playlist_id, song_id, position)
               SELECT $1, song_id, position
               FROM UNNEST($2::uuid[], $3::int4[]) AS t(song_id, position)"#,
        )
        .bind(id)
        .bind(song_ids)
        .bind(&positions)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn delete_playlist(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
