use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{clean_strings, json_strings, required_text, validate_optional_position};
use crate::entity::faq;
use crate::error::AppError;

pub const MAX_QUESTION_LEN: usize = 300;
pub const MAX_ANSWER_LEN: usize = 4000;
pub const MAX_QUESTIONS: usize = 20;

fn validate_questions(questions: Vec<String>) -> Result<Vec<String>, AppError> {
    let questions = clean_strings(questions);
    if questions.is_empty() || questions.len() > MAX_QUESTIONS {
        return Err(AppError::Validation(format!(
            "questions must contain 1-{MAX_QUESTIONS} non-empty entries"
        )));
    }
    for q in &questions {
        required_text("question", q, MAX_QUESTION_LEN)?;
    }
    Ok(questions)
}

#[derive(Serialize, ToSchema, Debug)]
pub struct FaqResponse {
    pub id: i32,
    /// Question variants, first one is displayed.
    pub questions: Vec<String>,
    pub answer: String,
    pub sort_order: i32,
}

impl From<faq::Model> for FaqResponse {
    fn from(model: faq::Model) -> Self {
        Self {
            id: model.id,
            questions: json_strings(&model.questions),
            answer: model.answer,
            sort_order: model.sort_order,
        }
    }
}

impl From<&faq::Model> for common::faq::Faq {
    fn from(model: &faq::Model) -> Self {
        Self {
            id: model.id,
            questions: json_strings(&model.questions),
            answer: model.answer.clone(),
        }
    }
}

#[derive(Serialize, ToSchema, Default)]
pub struct FaqListResponse {
    pub faqs: Vec<FaqResponse>,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct CreateFaqRequest {
    pub questions: Vec<String>,
    pub answer: String,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
}

/// A create request that passed validation.
#[derive(Debug)]
pub struct ValidFaq {
    pub questions: Vec<String>,
    pub answer: String,
    pub sort_order: Option<i32>,
}

impl CreateFaqRequest {
    pub fn validate(self) -> Result<ValidFaq, AppError> {
        validate_optional_position(self.sort_order)?;
        Ok(ValidFaq {
            answer: required_text("answer", &self.answer, MAX_ANSWER_LEN)?,
            questions: validate_questions(self.questions)?,
            sort_order: self.sort_order,
        })
    }
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct UpdateFaqRequest {
    pub questions: Option<Vec<String>>,
    pub answer: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
}

impl UpdateFaqRequest {
    /// Validated `(questions, answer)`; `None` entries are left unchanged.
    pub fn validate(self) -> Result<(Option<Vec<String>>, Option<String>, Option<i32>), AppError> {
        validate_optional_position(self.sort_order)?;
        let questions = self.questions.map(validate_questions).transpose()?;
        let answer = self
            .answer
            .map(|a| required_text("answer", &a, MAX_ANSWER_LEN))
            .transpose()?;
        Ok((questions, answer, self.sort_order))
    }
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct MatchFaqRequest {
    #[serde(alias = "q", alias = "message")]
    pub question: String,
}
