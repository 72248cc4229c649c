use crate::required;
use app_error::AppError;
use serde::{Deserialize, Serialize};

pub const MISSING_MESSAGE: &str = "Mensaje requerido";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PostChatInput {
    #[serde(default)]
    pub message: Option<String>,
}

impl PostChatInput {
    pub fn message(&self) -> Result<&str, AppError> {
        required(&self.message).ok_or_else(|| AppError::bad_request(MISSING_MESSAGE))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostChatOutput {
    pub response: String,
    pub understood: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetQuestionsOutput {
    pub questions: Vec<String>,
}
