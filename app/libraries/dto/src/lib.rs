pub mod admin;
pub mod auth;
pub mod chat;

/// Trims an optional request field, treating blank text as absent.
pub(crate) fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageOutput {
    pub message: String,
}

impl MessageOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
