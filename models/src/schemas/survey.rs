use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::params::ai::SurveyType;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    YesNo,
    Rating,
}

impl QuestionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "multiple-choice" => Some(Self::MultipleChoice),
            "text" => Some(Self::Text),
            "yes-no" => Some(Self::YesNo),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SurveyQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SurveyMetadata {
    pub description: String,
    pub question_count: usize,
    pub survey_type: SurveyType,
    pub ai_generated: bool,
    pub model: String,
    pub generated_by: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SurveyGenerationSchema {
    pub status: String,
    pub questions: Vec<SurveyQuestion>,
    pub metadata: SurveyMetadata,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ChatFeedSchema {
    pub msg: String,
    pub data: Value,
}
