use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SurveyType {
    #[default]
    General,
    Government,
    Health,
    Education,
    Infrastructure,
    Employment,
    Social,
    Environment,
    Technology,
    Finance,
}

impl SurveyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyType::General => "general",
            SurveyType::Government => "government",
            SurveyType::Health => "health",
            SurveyType::Education => "education",
            SurveyType::Infrastructure => "infrastructure",
            SurveyType::Employment => "employment",
            SurveyType::Social => "social",
            SurveyType::Environment => "environment",
            SurveyType::Technology => "technology",
            SurveyType::Finance => "finance",
        }
    }
}

fn default_question_count() -> u8 {
    5
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct SurveyGenerationParams {
    /// Survey topic and requirements
    #[validate(length(max = 2000), custom(function = "validate_description"))]
    pub description: String,
    #[serde(default = "default_question_count")]
    #[validate(range(min = 3, max = 15))]
    pub question_count: u8,
    #[serde(default)]
    pub survey_type: SurveyType,
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().chars().count() < 20 {
        return Err(ValidationError::new("too_short")
            .with_message("Description must be at least 20 characters long".into()));
    }
    Ok(())
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct ChatFeedParams {
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}
