use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::domain::songs::choir_song::ChoirSong;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::song_repository_sqlx::{
    SONG_COLUMNS, load_tags, map_song,
};

fn map_choir_song(r: &PgRow) -> ChoirSong {
    ChoirSong {
        song: map_song(r),
        choir_id: r.get("choir_id"),
        key: r.try_get("key").ok().flatten(),
        notes: r.try_get("notes").ok().flatten(),
        base_song_id: r.try_get("base_song_id").ok().flatten(),
    }
}

pub struct SqlxChoirSongRepository {
    pub pool: PgPool,
}

impl SqlxChoirSongRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_tags(&self, mut rows: Vec<ChoirSong>) -> anyhow::Result<Vec<ChoirSong>> {
        let mut songs: Vec<_> = rows.iter().map(|cs| cs.song.clone()).collect();
        load_tags(&self.pool, &mut songs).await?;
        for (cs, song) in rows.iter_mut().zip(songs) {
            cs.song.tags = song.tags;
        }
        Ok(rows)
    }
}

#[async_trait]
impl ChoirSongRepository for SqlxChoirSongRepository {
    async fn insert_choir_song(&self, song: &ChoirSong) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"INSERT INTO songs (id, title, composer, arranger, lyrics, created_by, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(song.id())
        .bind(&song.song.title)
        .bind(song.song.composer.as_deref())
        .bind(song.song.arranger.as_deref())
        .bind(song.song.lyrics.as_deref())
        .bind(song.song.created_by)
        .bind(song.song.created_at)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"INSERT INTO choir_songs (song_id, choir_id, base_song_id, key, notes)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(song.id())
        .bind(song.choir_id)
        .bind(song.base_song_id)
        .bind(song.key.as_deref())
        .bind(song.notes.as_deref())
        .execute(&mut *tx)
        .await?;
        for tag in &song.song.tags {
            sqlx::query(
                "INSERT INTO song_tags (song_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(song.id())
            .bind(tag.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ChoirSong>> {
        let row = sqlx::query(&format!(
            r#"SELECT {SONG_COLUMNS}, cs.choir_id, cs.key, cs.notes, cs.base_song_id
               FROM choir_songs cs
               JOIN songs s ON s.id = cs.song_id
               WHERE cs.song_id = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let found = row.as_ref().map(map_choir_song).into_iter().collect();
        Ok(self.with_tags(found).await?.into_iter().next())
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<ChoirSong>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {SONG_COLUMNS}, cs.choir_id, cs.key, cs.notes, cs.base_song_id
               FROM choir_songs cs
               JOIN songs s ON s.id = cs.song_id
               WHERE cs.choir_id = $1
               ORDER BY s.title ASC"#
        ))
        .bind(choir_id)
        .fetch_all(&self.pool)
        .await?;
        self.with_tags(rows.iter().map(map_choir_song).collect())
            .await
    }

    async fn update_choir_song(&self, song: &ChoirSong) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            "UPDATE choir_songs SET key = $2, notes = $3 WHERE song_id = $1",
        )
        .bind(song.id())
        .bind(song.key.as_deref())
        .bind(song.notes.as_deref())
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            return Ok(false);
        }
        sqlx::query(
            r#"UPDATE songs SET title = $2, composer = $3, arranger = $4, lyrics = $5
               WHERE id = $1"#,
        )
        .bind(song.id())
        .bind(&song.song.title)
        .bind(song.song.composer.as_deref())
        .bind(song.song.arranger.as_deref())
        .bind(song.song.lyrics.as_deref())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }
}
