use std::time::Duration;

use sqlx::{Pool, Postgres};

use crate::application::ports::conflict::UniqueViolation;

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Embedded at compile time from ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Cheap round-trip used by the health endpoint.
pub async fn ping(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Unique-constraint failures become [`UniqueViolation`]; everything else passes through.
pub fn map_unique_violation(err: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return UniqueViolation::on(db.constraint().unwrap_or("unknown")).into();
        }
    }
    err.into()
}

pub mod repositories;
