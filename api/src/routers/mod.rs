use axum::Router;

pub mod ai;
pub mod auth;
pub mod root;
pub mod user;

use ai::create_ai_router;
use app::state::AppState;
use auth::create_auth_router;
use root::create_root_router;
use user::create_user_router;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_root_router())
        .nest("/auth", create_auth_router())
        .nest("/users", create_user_router())
        .nest("/ai", create_ai_router())
        .with_state(state)
}
