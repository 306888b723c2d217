use axum::{Router, response::IntoResponse, routing::get};

use app::state::AppState;
use models::schemas::message::MessageSchema;

use crate::extractor::Json;

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses((status = 200, description = "Service is up", body = MessageSchema))
)]
pub async fn root_get() -> impl IntoResponse {
    Json(MessageSchema::new("Welcome to the Sākṣin survey API"))
}

pub fn create_root_router() -> Router<AppState> {
    Router::new().route("/", get(root_get))
}
