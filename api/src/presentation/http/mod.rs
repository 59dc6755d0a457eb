use utoipa::OpenApi;

pub mod health;

#[derive(OpenApi)]
#[openapi(
    info(title = "ChoirApp API"),
    paths(health::health),
    components(schemas(health::HealthResp)),
    tags((name = "Health", description = "System health checks"))
)]
pub struct ApiDoc;
