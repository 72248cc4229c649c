use app_config::AppConfig;
use app_cryptography::{
    hash::verify,
    jwt::{Algorithm, Claims, generate_token},
};
use app_dto::auth::login::{AuthOutput, PostLoginInput};
use app_error::AppError;
use app_schema::auth::users::{AdminUser, PublicUser};
use app_state::AppState;
use axum::extract::{Json, State, rejection::JsonRejection};
use std::sync::Arc;
use tracing::*;

const AUTH_FAILED_MESSAGE: &str = "Credenciales inválidas";

pub async fn post_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostLoginInput>, JsonRejection>,
) -> Result<Json<AuthOutput>, AppError> {
    let Json(args) = payload?;
    let (username, password) = args.credentials()?;
    // Search for user
    let user_info = match state.store.find_admin_by_username(username).await? {
        Some(user) => user,
        None => {
            return Err(AppError::unauthorized(AUTH_FAILED_MESSAGE));
        }
    };
    if !verify(password, &user_info.password_hash)? {
        return Err(AppError::unauthorized(AUTH_FAILED_MESSAGE));
    }
    info!("User {} logged in", user_info.username);
    Ok(Json(auth_output(&state.config, &user_info)?))
}

/// Signs a session token for `user` and pairs it with the public profile.
pub(crate) fn auth_output(config: &AppConfig, user: &AdminUser) -> Result<AuthOutput, AppError> {
    let claims = Claims::new(
        user.id,
        &user.username,
        &user.email,
        config.jwt_session_hours,
    );
    let token = generate_token(Algorithm::HS256, &config.jwt_access_key, &claims)?;
    Ok(AuthOutput {
        token,
        user: PublicUser::from(user),
    })
}
