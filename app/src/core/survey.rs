use models::params::ai::SurveyType;
use models::schemas::survey::{QuestionType, SurveyQuestion};
use serde_json::Value;

const MIN_QUESTION_LEN: usize = 10;
const MIN_CHOICES: usize = 2;
const MAX_CHOICES: usize = 5;

pub fn system_message(survey_type: SurveyType, question_count: u8) -> String {
    format!(
        r#"
You are an expert survey designer for government and organizational research. Your task is to create high-quality, unbiased survey questions that will gather meaningful data.

Survey Context:
- Type: {survey_type}
- Purpose: Data collection for policy making and analysis
- Target: General public/citizens
- Format: Digital survey platform

Requirements:
1. Generate EXACTLY {question_count} questions
2. Mix different question types: multiple-choice, yes-no, rating, text
3. Questions should be clear, unbiased, and professionally written
4. Include 2-5 relevant options for multiple-choice questions
5. Ensure questions gather actionable insights
6. Use simple, accessible language
7. Avoid leading or loaded questions

Output Format (JSON):
Return ONLY a valid JSON array where each question object has:
{{
  "id": "1",
  "type": "multiple-choice" | "text" | "yes-no" | "rating",
  "question": "Clear question text",
  "options": ["option1", "option2", "option3"] (only for multiple-choice),
  "required": true/false
}}

Avoid:
- Personal or sensitive information requests
- Leading questions that suggest desired answers
- Overly technical jargon
- Questions that could be discriminatory
"#,
        survey_type = survey_type.as_str(),
        question_count = question_count,
    )
}

pub fn prompt(description: &str, question_count: u8) -> String {
    format!(
        r#"
Based on the following survey description, generate {question_count} professional survey questions:

DESCRIPTION: "{description}"

Requirements:
- Create a mix of question types (multiple-choice, yes-no, rating, text)
- Questions should directly relate to the survey description
- Include clear, actionable options for multiple-choice questions
- Make questions accessible to general public
- Ensure questions will provide valuable insights for decision-making

Please generate the questions as a JSON array following the specified format. Return ONLY the JSON array, no additional text.
"#
    )
}

/// Extracts the question list from a model reply.
///
/// Replies without a readable JSON array fall back to the built-in set.
/// Items that cannot be repaired are dropped, so the result may be empty.
pub fn parse_questions(response: &str, expected: usize) -> Vec<SurveyQuestion> {
    let response = response.trim();
    let array = match (response.find('['), response.rfind(']')) {
        (Some(start), Some(end)) if end > start => &response[start..=end],
        _ => return fallback_questions(expected),
    };

    let items = match serde_json::from_str::<Vec<Value>>(array) {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Error parsing AI response: {}", e);
            return fallback_questions(expected);
        }
    };

    items
        .iter()
        .take(expected)
        .enumerate()
        .filter_map(|(i, item)| format_question(item, i + 1))
        .collect()
}

/// Normalises one raw question; `None` when it has no usable text.
pub fn format_question(raw: &Value, id: usize) -> Option<SurveyQuestion> {
    let question = raw.get("question")?.as_str()?.trim().to_owned();
    if question.chars().count() < MIN_QUESTION_LEN {
        return None;
    }

    let mut kind = raw
        .get("type")
        .and_then(Value::as_str)
        .and_then(QuestionType::parse)
        .unwrap_or(QuestionType::Text);

    let mut options = None;
    if kind == QuestionType::MultipleChoice {
        match raw.get("options").and_then(Value::as_array) {
            Some(list) if list.len() >= MIN_CHOICES => {
                options = Some(
                    list.iter()
                        .take(MAX_CHOICES)
                        .map(|opt| match opt {
                            Value::String(s) => s.trim().to_owned(),
                            other => other.to_string(),
                        })
                        .collect(),
                );
            }
            _ => kind = QuestionType::Text,
        }
    }

    Some(SurveyQuestion {
        id: id.to_string(),
        kind,
        question,
        options,
        required: raw.get("required").and_then(Value::as_bool).unwrap_or(true),
    })
}

pub fn fallback_questions(count: usize) -> Vec<SurveyQuestion> {
    fn q(id: &str, kind: QuestionType, text: &str, options: Option<&[&str]>, required: bool) -> SurveyQuestion {
        SurveyQuestion {
            id: id.to_owned(),
            kind,
            question: text.to_owned(),
            options: options.map(|o| o.iter().map(|s| s.to_string()).collect()),
            required,
        }
    }

    vec![
        q(
            "1",
            QuestionType::MultipleChoice,
            "How would you rate your overall satisfaction with current services?",
            Some(&["Excellent", "Good", "Average", "Poor", "Very Poor"]),
            true,
        ),
        q(
            "2",
            QuestionType::YesNo,
            "Do you think improvements are needed in this area?",
            None,
            true,
        ),
        q(
            "3",
            QuestionType::Rating,
            "On a scale of 1-5, how important is this topic to you?",
            None,
            true,
        ),
        q(
            "4",
            QuestionType::Text,
            "What specific improvements would you suggest?",
            None,
            false,
        ),
        q(
            "5",
            QuestionType::MultipleChoice,
            "What is your primary concern in this area?",
            Some(&["Accessibility", "Quality", "Cost", "Availability", "Other"]),
            true,
        ),
    ]
    .into_iter()
    .take(count)
    .collect()
}
