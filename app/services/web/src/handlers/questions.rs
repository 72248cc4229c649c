use app_dto::{
    MessageOutput,
    admin::questions::{
        AdminQuestionsOutput, CREATED_MESSAGE, CreatedQuestionOutput, DELETED_MESSAGE,
        NOT_FOUND_MESSAGE, QuestionInput, UPDATED_MESSAGE,
    },
};
use app_error::AppError;
use app_middleware::get_username;
use app_state::AppState;
use axum::{
    extract::{
        Json, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::HeaderMap,
};
use std::sync::Arc;
use tracing::*;

pub async fn get_admin_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AdminQuestionsOutput>, AppError> {
    let questions = state.store.list_qa_pairs().await?;
    debug!("{} questions listed", questions.len());
    Ok(Json(AdminQuestionsOutput { questions }))
}

pub async fn post_admin_question(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionInput>, JsonRejection>,
) -> Result<Json<CreatedQuestionOutput>, AppError> {
    let Json(args) = payload?;
    let qa = args.validate()?;
    let id = state.store.insert_qa_pair(&qa).await?;
    info!("Question {} created by {:?}", id, get_username(&headers));
    Ok(Json(CreatedQuestionOutput {
        message: CREATED_MESSAGE.to_owned(),
        id,
    }))
}

pub async fn put_admin_question(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuestionInput>, JsonRejection>,
) -> Result<Json<MessageOutput>, AppError> {
    let Path(id) = id?;
    let Json(args) = payload?;
    let qa = args.validate()?;
    if !state.store.update_qa_pair(id, &qa).await? {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    }
    info!("Question {} updated by {:?}", id, get_username(&headers));
    Ok(Json(MessageOutput::new(UPDATED_MESSAGE)))
}

pub async fn delete_admin_question(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageOutput>, AppError> {
    let Path(id) = id?;
    if !state.store.delete_qa_pair(id).await? {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    }
    info!("Question {} deleted by {:?}", id, get_username(&headers));
    Ok(Json(MessageOutput::new(DELETED_MESSAGE)))
}
