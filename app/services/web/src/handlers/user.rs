use crate::handlers::login::auth_output;
use app_cryptography::hash::hash;
use app_dto::auth::{
    login::AuthOutput,
    user::{GetVerifyOutput, PostRegisterInput},
};
use app_error::AppError;
use app_middleware::{INVALID_TOKEN_MESSAGE, get_auth_user};
use app_state::AppState;
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tracing::*;

const DUPLICATE_USER_MESSAGE: &str = "El usuario o email ya existe";

pub async fn post_register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostRegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthOutput>), AppError> {
    let Json(args) = payload?;
    let registration = args.validate()?;
    let hash_password = hash(registration.password, state.config.bcrypt_cost)?;
    let user_info = state
        .store
        .insert_admin(registration.username, registration.email, &hash_password)
        .await
        .map_err(|e| {
            if e.status == StatusCode::CONFLICT {
                AppError::conflict(DUPLICATE_USER_MESSAGE)
            } else {
                e
            }
        })?;
    info!("Registered admin user {}", user_info.username);
    Ok((
        StatusCode::CREATED,
        Json(auth_output(&state.config, &user_info)?),
    ))
}

pub async fn get_verify(headers: HeaderMap) -> Result<Json<GetVerifyOutput>, AppError> {
    let user = get_auth_user(&headers).ok_or_else(|| AppError::forbidden(INVALID_TOKEN_MESSAGE))?;
    Ok(Json(GetVerifyOutput { valid: true, user }))
}
