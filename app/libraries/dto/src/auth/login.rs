use crate::required;
use app_error::AppError;
use app_schema::auth::users::PublicUser;
use serde::{Deserialize, Serialize};

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Usuario y contraseña son requeridos";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PostLoginInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl PostLoginInput {
    /// Username is trimmed; the password is taken verbatim.
    pub fn credentials(&self) -> Result<(&str, &str), AppError> {
        let username = required(&self.username);
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (username, password) {
            (Some(u), Some(p)) => Ok((u, p)),
            _ => Err(AppError::bad_request(MISSING_CREDENTIALS_MESSAGE)),
        }
    }
}

/// Returned by both login and registration.
#[derive(Clone, Debug, Serialize)]
pub struct AuthOutput {
    pub token: String,
    pub user: PublicUser,
}
