use app_error::AppError;
use app_report::csv::{CSV_FILE_NAME, chat_logs_to_csv};
use app_state::AppState;
use axum::{
    extract::State,
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

pub async fn get_export(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let logs = state.store.list_chat_logs().await?;
    let body = chat_logs_to_csv(&logs, &Local);
    let disposition = HeaderValue::from_str(&format!("attachment; filename={CSV_FILE_NAME}"))
        .map_err(|e| AppError::internal(format!("{e}")))?;
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
