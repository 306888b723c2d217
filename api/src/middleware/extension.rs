use app::state::AppState;
use app::utils::jwt::{TokenType, verify_token};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use models::schemas::user::{AuthSchema, AuthUserSchema};

/// Decodes a bearer access token, if any, into an `AuthSchema` extension.
/// Requests without a valid token still go through as anonymous.
pub async fn extension(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    let user = token
        .and_then(|token| verify_token(&state.config, token, TokenType::Access).ok())
        .map(AuthUserSchema::from);

    req.extensions_mut().insert(AuthSchema { user });

    next.run(req).await
}
