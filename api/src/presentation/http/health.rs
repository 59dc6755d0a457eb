use axum::http::{HeaderMap, header::ACCEPT_LANGUAGE};
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::services::locale::{
    InMemoryPreferenceCache, Language, detect_language, parse_accept_language,
};
use crate::infrastructure::db::{self, PgPool};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// UI language negotiated from `Accept-Language`.
    pub language: &'static str,
}

impl HealthResp {
    fn new(db_ok: bool, language: Language) -> Self {
        Self {
            status: if db_ok { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            language: language.code(),
        }
    }
}

fn request_language(headers: &HeaderMap) -> Language {
    let tags = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default();
    // No stored preference server-side; each request negotiates afresh
    detect_language(&InMemoryPreferenceCache::default(), &tags)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<PgPool>, headers: HeaderMap) -> Json<HealthResp> {
    let db_ok = match db::ping(&pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = ?e, "health_db_unreachable");
            false
        }
    };
    Json(HealthResp::new(db_ok, request_language(&headers)))
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
