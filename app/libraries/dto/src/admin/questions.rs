use crate::required;
use app_error::AppError;
use app_schema::qa::{NewQaPair, QaPair, split_keywords};
use serde::{Deserialize, Serialize};

pub const MISSING_FIELDS_MESSAGE: &str = "Todos los campos son obligatorios";
pub const NOT_FOUND_MESSAGE: &str = "Pregunta no encontrada";
pub const CREATED_MESSAGE: &str = "Pregunta agregada exitosamente";
pub const UPDATED_MESSAGE: &str = "Pregunta actualizada exitosamente";
pub const DELETED_MESSAGE: &str = "Pregunta eliminada exitosamente";

/// Body of both create and update.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuestionInput {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl QuestionInput {
    pub fn validate(&self) -> Result<NewQaPair, AppError> {
        let missing = || AppError::bad_request(MISSING_FIELDS_MESSAGE);
        let question = required(&self.question).ok_or_else(missing)?;
        let keywords = required(&self.keywords).ok_or_else(missing)?;
        let answer = required(&self.answer).ok_or_else(missing)?;
        // "," alone passes the blank check but carries no keyword.
        if split_keywords(keywords).is_empty() {
            return Err(missing());
        }
        Ok(NewQaPair {
            question: question.to_owned(),
            keywords: keywords.to_owned(),
            answer: answer.to_owned(),
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AdminQuestionsOutput {
    pub questions: Vec<QaPair>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedQuestionOutput {
    pub message: String,
    pub id: i64,
}
