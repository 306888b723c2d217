use axum::Router;
use axum::http::{HeaderValue, Method, header};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use app::config::Config;
use app::state::AppState;

use crate::middleware::extension::extension;
use crate::openapi::ApiDoc;
use crate::routers::create_router;

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring allowed origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(origins)
        .allow_credentials(true)
}

pub fn setup_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    create_router(state.clone())
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(state, extension))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub fn setup_config() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    Config::from_env()
}

pub async fn setup_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_lifetime(std::time::Duration::from_secs(60))
        .min_connections(2)
        .max_connections(20);

    Database::connect(opt).await
}
