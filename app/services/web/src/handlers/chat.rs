use app_dto::chat::{GetQuestionsOutput, PostChatInput, PostChatOutput};
use app_error::AppError;
use app_matcher::match_utterance;
use app_state::AppState;
use axum::extract::{Json, State, rejection::JsonRejection};
use std::sync::Arc;
use tracing::*;

pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostChatInput>, JsonRejection>,
) -> Result<Json<PostChatOutput>, AppError> {
    let Json(args) = payload?;
    let message = args.message()?;
    let records = state.store.list_qa_pairs().await?;
    let outcome = match_utterance(message, &records, state.config.effective_threshold());
    debug!("Chat {:?} understood={}", message, outcome.understood);
    // Best-effort; the response does not wait for the write.
    state
        .chat_logger
        .log(message, &outcome.answer, outcome.understood);
    Ok(Json(PostChatOutput {
        response: outcome.answer,
        understood: outcome.understood,
    }))
}

pub async fn get_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GetQuestionsOutput>, AppError> {
    let questions = state
        .store
        .list_qa_pairs()
        .await?
        .into_iter()
        .map(|qa| qa.question)
        .collect();
    Ok(Json(GetQuestionsOutput { questions }))
}
