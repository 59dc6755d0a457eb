use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::invite_link_repository::InviteLinkRepository;
use crate::domain::invitations::invite_link::InviteLink;
use crate::infrastructure::db::PgPool;

const LINK_COLUMNS: &str =
    "id, choir_id, token, created_by, created_at, expires_at, is_active, max_uses, uses";

fn map_link(r: &PgRow) -> InviteLink {
    InviteLink {
        id: r.get("id"),
        choir_id: r.get("choir_id"),
        token: r.get("token"),
        created_by: r.get("created_by"),
        created_at: r.get("created_at"),
        expires_at: r.get("expires_at"),
        is_active: r.get("is_active"),
        max_uses: r.get("max_uses"),
        uses: r.get("uses"),
    }
}

pub struct SqlxInviteLinkRepository {
    pub pool: PgPool,
}

impl SqlxInviteLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteLinkRepository for SqlxInviteLinkRepository {
    async fn insert_link(&self, link: &InviteLink) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO invite_links
                   (id, choir_id, token, created_by, created_at, expires_at, is_active, max_uses, uses)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(link.id)
        .bind(link.choir_id)
        .bind(&link.token)
        .bind(link.created_by)
        .bind(link.created_at)
        .bind(link.expires_at)
        .bind(link.is_active)
        .bind(link.max_uses)
        .bind(link.uses)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<InviteLink>> {
        let row = sqlx::query(&format!("SELECT {LINK_COLUMNS} FROM invite_links WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_link))
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<InviteLink>> {
        let row = sqlx::query(&format!(
            "SELECT {LINK_COLUMNS} FROM invite_links WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_link))
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<InviteLink>> {
        let rows = sqlx::query(&format!(
            "SELECT {LINK_COLUMNS} FROM invite_links WHERE choir_id = $1 ORDER BY created_at DESC"
        ))
        .bind(choir_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_link).collect())
    }

    async fn deactivate(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE invite_links SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn redeem(&self, id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let choir_id: Option<Uuid> = sqlx::query_scalar(
            r#"UPDATE invite_links SET uses = uses + 1
               WHERE id = $1
                 AND is_active
                 AND (expires_at IS NULL OR expires_at > $2)
                 AND (max_uses IS NULL OR uses < max_uses)
               RETURNING choir_id"#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(choir_id) = choir_id else {
            return Ok(false);
        };
        sqlx::query(
            r#"INSERT INTO choir_members (choir_id, user_id, is_admin) VALUES ($1, $2, FALSE)
               ON CONFLICT (choir_id, user_id) DO NOTHING"#,
        )
        .bind(choir_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }
}
