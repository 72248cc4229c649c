use crate::required;
use app_error::AppError;
use app_schema::auth::users::PublicUser;
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MISSING_FIELDS_MESSAGE: &str = "Todos los campos son obligatorios";
pub const SHORT_PASSWORD_MESSAGE: &str = "La contraseña debe tener al menos 6 caracteres";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PostRegisterInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl PostRegisterInput {
    pub fn validate(&self) -> Result<Registration<'_>, AppError> {
        let (Some(username), Some(email), Some(password)) = (
            required(&self.username),
            required(&self.email),
            self.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::bad_request(MISSING_FIELDS_MESSAGE));
        };
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(SHORT_PASSWORD_MESSAGE));
        }
        Ok(Registration {
            username,
            email,
            password,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GetVerifyOutput {
    pub valid: bool,
    pub user: PublicUser,
}

#[cfg(test)]
mod test {
    use super::*;

    fn input(username: &str, email: &str, password: &str) -> PostRegisterInput {
        PostRegisterInput {
            username: Some(username.to_owned()),
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
        }
    }

    #[test]
    fn short_password_is_rejected() {
        let err = input("ana", "ana@example.com", "12345").validate().unwrap_err();
        assert_eq!(err.message, SHORT_PASSWORD_MESSAGE);
    }

    #[test]
    fn missing_email_is_rejected() {
        let mut args = input("ana", "", "123456");
        assert_eq!(args.validate().unwrap_err().message, MISSING_FIELDS_MESSAGE);
        args.email = None;
        assert_eq!(args.validate().unwrap_err().status.as_u16(), 400);
    }

    #[test]
    fn valid_registration_is_trimmed() {
        let args = input(" ana ", "ana@example.com", "123456");
        let reg = args.validate().unwrap();
        assert_eq!(reg.username, "ana");
        assert_eq!(reg.password, "123456");
    }
}
