use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::tag_repository::TagRepository;
use crate::domain::songs::tag::Tag;
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn list_tags(&self, filter: Option<String>) -> anyhow::Result<Vec<(String, i64)>> {
        let like = filter
            .filter(|s| !s.trim().is_empty())
            .map(|f| format!("%{}%", f.trim()));
        let rows = sqlx::query(
            r#"SELECT t.name, COUNT(*)::BIGINT AS count
               FROM song_tags st
               JOIN tags t ON t.id = st.tag_id
               WHERE ($1::text IS NULL OR t.name ILIKE $1)
               GROUP BY t.name
               ORDER BY count DESC, t.name ASC"#,
        )
        .bind(like)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.get("name"), r.get("count")))
            .collect())
    }

    async fn upsert_tag(&self, name: &str) -> anyhow::Result<Tag> {
        let row = sqlx::query(
            r#"INSERT INTO tags (id, name) VALUES ($1, $2)
               ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
               RETURNING id, name"#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(Tag {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    async fn attach_to_song(&self, song_id: Uuid, tag_id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO song_tags (song_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(song_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn detach_from_song(&self, song_id: Uuid, tag_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM song_tags WHERE song_id = $1 AND tag_id = $2")
            .bind(song_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
