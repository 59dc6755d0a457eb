use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, UserRole};
use crate::infrastructure::db::PgPool;

/// Column list matching `map_user`, for queries aliasing users as `u`.
pub(crate) const USER_COLUMNS: &str =
    "u.id, u.external_id, u.email, u.name, u.role, u.has_completed_onboarding, u.created_at";

pub(crate) fn map_user(r: &PgRow) -> User {
    let role: String = r.get("role");
    User {
        id: r.get("id"),
        email: r.get("email"),
        name: r.get("name"),
        role: UserRole::parse(&role).unwrap_or_default(),
        has_completed_onboarding: r.get("has_completed_onboarding"),
        external_id: r.try_get("external_id").ok().flatten(),
        created_at: r.get("created_at"),
    }
}

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO users (id, external_id, email, name, role, has_completed_onboarding, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(user.id)
        .bind(user.external_id.as_deref())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.has_completed_onboarding)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE lower(u.email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn save_profile(&self, user: &User) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE users SET role = $2, has_completed_onboarding = $3 WHERE id = $1",
        )
        .bind(user.id)
        .bind(user.role.as_str())
        .bind(user.has_completed_onboarding)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
