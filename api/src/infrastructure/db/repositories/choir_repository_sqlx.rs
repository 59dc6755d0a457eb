use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::domain::choirs::choir::{Choir, ChoirMember};
use crate::infrastructure::db::{PgPool, map_unique_violation};
use crate::infrastructure::db::repositories::user_repository_sqlx::{USER_COLUMNS, map_user};

pub struct SqlxChoirRepository {
    pub pool: PgPool,
}

impl SqlxChoirRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn members_of(
        &self,
        choir_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, Vec<ChoirMember>>> {
        let rows = sqlx::query(&format!(
            r#"SELECT m.choir_id, m.is_admin, {USER_COLUMNS}
               FROM choir_members m
               JOIN users u ON u.id = m.user_id
               WHERE m.choir_id = ANY($1)
               ORDER BY m.is_admin DESC, m.joined_at ASC, u.name ASC"#
        ))
        .bind(choir_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut out: HashMap<Uuid, Vec<ChoirMember>> = HashMap::new();
        for r in rows {
            out.entry(r.get("choir_id")).or_default().push(ChoirMember {
                user: map_user(&r),
                is_admin: r.get("is_admin"),
            });
        }
        Ok(out)
    }

    async fn with_members(&self, rows: Vec<PgRow>) -> anyhow::Result<Vec<Choir>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.get("id")).collect();
        let mut members = self.members_of(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let id: Uuid = r.get("id");
                Choir {
                    id,
                    name: r.get("name"),
                    description: r.try_get("description").ok().flatten(),
                    admin_user_id: r.get("admin_user_id"),
                    members: members.remove(&id).unwrap_or_default(),
                    created_at: r.get("created_at"),
                }
            })
            .collect())
    }
}

#[async_trait]
impl ChoirRepository for SqlxChoirRepository {
    async fn insert_choir(&self, choir: &Choir) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"INSERT INTO choirs (id, name, description, admin_user_id, created_at)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(choir.id)
        .bind(&choir.name)
        .bind(choir.description.as_deref())
        .bind(choir.admin_user_id)
        .bind(choir.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;
        for member in &choir.members {
            sqlx::query(
                "INSERT INTO choir_members (choir_id, user_id, is_admin) VALUES ($1, $2, $3)",
            )
            .bind(choir.id)
            .bind(member.user.id)
            .bind(member.is_admin)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Choir>> {
        let rows = sqlx::query(
            "SELECT id, name, description, admin_user_id, created_at FROM choirs WHERE id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(self.with_members(rows).await?.into_iter().next())
    }

    async fn list_for_member(&self, user_id: Uuid) -> anyhow::Result<Vec<Choir>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.name, c.description, c.admin_user_id, c.created_at
               FROM choirs c
               JOIN choir_members m ON m.choir_id = c.id AND m.user_id = $1
               ORDER BY c.name ASC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        self.with_members(rows).await
    }

    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE choirs SET name = $2, description = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_choir(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        // Arrangement rows cascade with the choir; their song rows do not.
        sqlx::query(
            "DELETE FROM songs WHERE id IN (SELECT song_id FROM choir_songs WHERE choir_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let res = sqlx::query("DELETE FROM choirs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }

    async fn add_member(
        &self,
        choir_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO choir_members (choir_id, user_id, is_admin) VALUES ($1, $2, $3)
               ON CONFLICT (choir_id, user_id) DO NOTHING"#,
        )
        .bind(choir_id)
        .bind(user_id)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_member(&self, choir_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM choir_members WHERE choir_id = $1 AND user_id = $2")
            .bind(choir_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_member_admin(
        &self,
        choir_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE choir_members SET is_admin = $3 WHERE choir_id = $1 AND user_id = $2",
        )
        .bind(choir_id)
        .bind(user_id)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn exists(&self, id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM choirs WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn is_member(&self, choir_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM choir_members WHERE choir_id = $1 AND user_id = $2)",
        )
        .bind(choir_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn name_exists(&self, name: &str) -> anyhow::Result<bool> {
        // Both sides go through Postgres lower() so the check agrees with choirs_name_lower_idx
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM choirs WHERE lower(name) = lower($1))",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn administers_any(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(
                   SELECT 1 FROM choirs WHERE admin_user_id = $1
                   UNION ALL
                   SELECT 1 FROM choir_members WHERE user_id = $1 AND is_admin
               )"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}
