pub use jsonwebtoken::Algorithm;
use jsonwebtoken::errors::Error;
pub use jsonwebtoken::errors::ErrorKind as JWTErrorKind;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, TokenData, Validation, decode as jdec, encode as jenc,
};
use serde::{Deserialize, Serialize};

/// Session claims for an admin user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub iat: i64,
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl Claims {
    pub fn new(id: i64, username: &str, email: &str, session_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            iat: now.timestamp(),
            exp: (now + Duration::hours(session_hours)).timestamp(),
            id,
            username: username.to_owned(),
            email: email.to_owned(),
        }
    }
}

pub fn generate_token<T>(algorithm: Algorithm, key: &str, claims: T) -> Result<String, Error>
where
    T: Serialize,
{
    jenc(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
}

pub fn validate_token<T>(
    algorithm: Algorithm,
    key: &str,
    token: &str,
) -> Result<TokenData<T>, Error>
where
    for<'a> T: Deserialize<'a>,
{
    let validation = Validation::new(algorithm);
    jdec::<T>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn check_jwt_functions() {
        let claims = Claims::new(1, "admin", "admin@unit", 24);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        let token = generate_token(Algorithm::HS256, SECRET, &claims).unwrap();
        let validate = validate_token::<Claims>(Algorithm::HS256, SECRET, &token).unwrap();
        assert_eq!(validate.claims.username, "admin");
        assert_eq!(validate.claims.id, 1);
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new(1, "admin", "admin@unit", 24);
        claims.iat -= 25 * 3600;
        claims.exp -= 25 * 3600;
        let token = generate_token(Algorithm::HS256, SECRET, &claims).unwrap();
        let error = validate_token::<Claims>(Algorithm::HS256, SECRET, &token).err();
        assert_eq!(error.unwrap().kind(), &JWTErrorKind::ExpiredSignature);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let claims = Claims::new(1, "admin", "admin@unit", 24);
        let token = generate_token(Algorithm::HS256, SECRET, &claims).unwrap();
        let error = validate_token::<Claims>(Algorithm::HS256, "other", &token).err();
        assert_eq!(error.unwrap().kind(), &JWTErrorKind::InvalidSignature);
    }
}
