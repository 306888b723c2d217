use models::params::ai::{ChatFeedParams, SurveyGenerationParams};
use models::schemas::survey::{ChatFeedSchema, SurveyGenerationSchema, SurveyMetadata};

use crate::core::survey;
use crate::error::AppError;
use crate::utils::chat::ChatService;
use crate::utils::gemini::TextGenerator;

pub async fn generate_survey(
    generator: &dyn TextGenerator,
    params: SurveyGenerationParams,
    requested_by: &str,
) -> Result<SurveyGenerationSchema, AppError> {
    let description = params.description.trim().to_owned();
    let count = params.question_count;

    let system = survey::system_message(params.survey_type, count);
    let prompt = survey::prompt(&description, count);
    let response = generator.generate(&system, &prompt).await?;

    let questions = survey::parse_questions(&response, count as usize);
    if questions.is_empty() {
        tracing::error!("AI reply contained no usable questions");
        return Err(AppError::UpstreamService(
            "Failed to generate valid survey questions".to_string(),
        ));
    }

    tracing::info!(
        "generated {} {} survey questions for {}",
        questions.len(),
        params.survey_type.as_str(),
        requested_by
    );

    Ok(SurveyGenerationSchema {
        status: "success".to_string(),
        metadata: SurveyMetadata {
            description,
            question_count: questions.len(),
            survey_type: params.survey_type,
            ai_generated: true,
            model: generator.model().to_owned(),
            generated_by: requested_by.to_owned(),
        },
        questions,
    })
}

pub async fn feed_chat(
    chat: &dyn ChatService,
    email: &str,
    params: ChatFeedParams,
) -> Result<ChatFeedSchema, AppError> {
    let data = chat.feed(email, &params.content).await?;
    Ok(ChatFeedSchema {
        msg: "Data fed successfully".to_string(),
        data,
    })
}
