use app_cryptography::jwt::{Algorithm, Claims, validate_token};
use app_error::AppError;
use app_schema::auth::users::PublicUser;
use app_state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::*;

pub const MISSING_TOKEN_MESSAGE: &str = "Token de acceso requerido";
pub const INVALID_TOKEN_MESSAGE: &str = "Token inválido o expirado";

const AUTH_ID: &str = "x-auth-id";
const AUTH_USERNAME: &str = "x-auth-username";
const AUTH_EMAIL: &str = "x-auth-email";

/// Requires `Authorization: Bearer <token>`: 401 when absent, 403 when the
/// signature or expiry check fails. Verified claims are forwarded to the
/// handler as `x-auth-*` request headers.
pub async fn web_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    info!(
        "Authorization Middleware Running for {} {}",
        req.method(),
        req.uri()
    );

    // Client-supplied identity headers are never trusted.
    for name in [AUTH_ID, AUTH_USERNAME, AUTH_EMAIL] {
        req.headers_mut().remove(name);
    }

    let token: String = match bearer_token(req.headers()) {
        Some(t) => t.to_owned(),
        None => return AppError::unauthorized(MISSING_TOKEN_MESSAGE).into_response(),
    };

    match validate_token::<Claims>(Algorithm::HS256, &state.config.jwt_access_key, &token) {
        Ok(token_data) => {
            let claims = token_data.claims;
            add_req_headers(&mut req, &claims);
            debug!("User {} approved using access token", claims.username);
            next.run(req).await
        }
        Err(e) => {
            debug!("Token rejected: {}", e);
            AppError::forbidden(INVALID_TOKEN_MESSAGE).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

fn add_req_headers(req: &mut Request, claims: &Claims) {
    // If any value is invalid for headers, we just skip it (don't panic middleware)
    for (name, value) in [
        (AUTH_ID, claims.id.to_string()),
        (AUTH_USERNAME, claims.username.clone()),
        (AUTH_EMAIL, claims.email.clone()),
    ] {
        if let Ok(v) = HeaderValue::from_str(&value) {
            req.headers_mut().insert(name, v);
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn get_username(headers: &HeaderMap) -> Option<String> {
    header_str(headers, AUTH_USERNAME).map(str::to_owned)
}

/// The user the middleware authenticated for this request.
pub fn get_auth_user(headers: &HeaderMap) -> Option<PublicUser> {
    Some(PublicUser {
        id: header_str(headers, AUTH_ID)?.parse().ok()?,
        username: header_str(headers, AUTH_USERNAME)?.to_owned(),
        email: header_str(headers, AUTH_EMAIL)?.to_owned(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("Basic abc")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer a b")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn auth_user_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_ID, HeaderValue::from_static("3"));
        headers.insert(AUTH_USERNAME, HeaderValue::from_static("ana"));
        headers.insert(AUTH_EMAIL, HeaderValue::from_static("ana@example.com"));
        let user = get_auth_user(&headers).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(get_username(&headers).as_deref(), Some("ana"));

        headers.remove(AUTH_EMAIL);
        assert!(get_auth_user(&headers).is_none());
    }
}
