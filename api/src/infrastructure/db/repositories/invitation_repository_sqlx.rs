use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::invitation_repository::{
    InvitationEligibility, InvitationRepository, InvitationRow,
};
use crate::domain::invitations::invitation::{Invitation, InvitationStatus};
use crate::infrastructure::db::{PgPool, map_unique_violation};

fn map_invitation(r: &PgRow) -> anyhow::Result<Invitation> {
    let status: String = r.get("status");
    Ok(Invitation {
        id: r.get("id"),
        choir_id: r.get("choir_id"),
        email: r.get("email"),
        token: r.get("token"),
        status: InvitationStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown invitation status: {status}"))?,
        sent_at: r.get("sent_at"),
    })
}

fn map_row(r: &PgRow) -> anyhow::Result<InvitationRow> {
    Ok(InvitationRow {
        invitation: map_invitation(r)?,
        choir_name: r.get("choir_name"),
    })
}

pub struct SqlxInvitationRepository {
    pub pool: PgPool,
}

impl SqlxInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for SqlxInvitationRepository {
    async fn insert_invitation(&self, invitation: &Invitation) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO invitations (id, choir_id, email, token, status, sent_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(invitation.id)
        .bind(invitation.choir_id)
        .bind(&invitation.email)
        .bind(&invitation.token)
        .bind(invitation.status.as_str())
        .bind(invitation.sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        Ok(())
    }

    async fn find_pending_by_token(&self, token: &str) -> anyhow::Result<Option<Invitation>> {
        let row = sqlx::query(
            r#"SELECT id, choir_id, email, token, status, sent_at
               FROM invitations WHERE token = $1 AND status = 'pending'"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_invitation).transpose()
    }

    async fn accept(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let choir_id: Option<Uuid> = sqlx::query_scalar(
            r#"UPDATE invitations SET status = 'accepted'
               WHERE id = $1 AND status = 'pending'
               RETURNING choir_id"#,
        )
        .bind(id)
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

    async fn reject(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE invitations SET status = 'rejected' WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_pending_for_email(&self, email: &str) -> anyhow::Result<Vec<InvitationRow>> {
        let rows = sqlx::query(
            r#"SELECT i.id, i.choir_id, i.email, i.token, i.status, i.sent_at, c.name AS choir_name
               FROM invitations i
               JOIN choirs c ON c.id = i.choir_id
               WHERE lower(i.email) = lower($1) AND i.status = 'pending'
               ORDER BY i.sent_at DESC"#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_row).collect()
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<InvitationRow>> {
        let rows = sqlx::query(
            r#"SELECT i.id, i.choir_id, i.email, i.token, i.status, i.sent_at, c.name AS choir_name
               FROM invitations i
               JOIN choirs c ON c.id = i.choir_id
               WHERE i.choir_id = $1
               ORDER BY i.sent_at DESC"#,
        )
        .bind(choir_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_row).collect()
    }

    async fn eligibility(
        &self,
        choir_id: Uuid,
        email: &str,
    ) -> anyhow::Result<InvitationEligibility> {
        let row = sqlx::query(
            r#"SELECT
                   EXISTS(SELECT 1 FROM choirs WHERE id = $1) AS choir_exists,
                   EXISTS(
                       SELECT 1 FROM choir_members m
                       JOIN users u ON u.id = m.user_id
                       WHERE m.choir_id = $1 AND lower(u.email) = lower($2)
                   ) AS already_member,
                   EXISTS(
                       SELECT 1 FROM invitations
                       WHERE choir_id = $1 AND lower(email) = lower($2) AND status = 'pending'
                   ) AS pending_invitation"#,
        )
        .bind(choir_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(InvitationEligibility {
            choir_exists: row.get("choir_exists"),
            already_member: row.get("already_member"),
            pending_invitation: row.get("pending_invitation"),
        })
    }
}
