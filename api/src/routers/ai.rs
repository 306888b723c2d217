use axum::{Router, extract::State, response::IntoResponse, routing::post};

use app::services::ai;
use app::state::AppState;
use models::params::ai::{ChatFeedParams, SurveyGenerationParams};
use models::schemas::survey::{ChatFeedSchema, SurveyGenerationSchema};

use crate::error::ApiError;
use crate::extractor::{CurrentUser, Json, Valid};
use crate::models::response::ApiErrorResponse;

#[utoipa::path(
    post,
    path = "/ai/surveys/generate",
    tag = "ai",
    request_body = SurveyGenerationParams,
    responses(
        (status = 200, description = "Generated survey questions", body = SurveyGenerationSchema),
        (status = 400, description = "Invalid description or count", body = ApiErrorResponse),
        (status = 502, description = "AI service failed", body = ApiErrorResponse),
        (status = 503, description = "AI service not configured", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn survey_generate_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Valid(Json(params)): Valid<Json<SurveyGenerationParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let survey = ai::generate_survey(state.ai.as_ref(), params, &user.email).await?;
    Ok(Json(survey))
}

#[utoipa::path(
    post,
    path = "/ai/chat/feed",
    tag = "ai",
    request_body = ChatFeedParams,
    responses(
        (status = 200, description = "Content forwarded to the chat service", body = ChatFeedSchema),
        (status = 502, description = "Chat service failed", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn chat_feed_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Valid(Json(params)): Valid<Json<ChatFeedParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let fed = ai::feed_chat(state.chat.as_ref(), &user.email, params).await?;
    Ok(Json(fed))
}

pub fn create_ai_router() -> Router<AppState> {
    Router::new()
        .route("/surveys/generate", post(survey_generate_post))
        .route("/chat/feed", post(chat_feed_post))
}
