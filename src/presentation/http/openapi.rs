use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::auth::register,
        crate::presentation::http::health::health,
    ),
    components(schemas(
        crate::presentation::http::auth::RegisterRequest,
        crate::presentation::http::auth::MessageResponse,
        crate::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Auth", description = "Account registration"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
