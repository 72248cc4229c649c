use app_dto::admin::stats::StatsOutput;
use app_error::AppError;
use app_report::stats::collect_stats;
use app_state::AppState;
use axum::extract::{Json, State};
use std::sync::Arc;

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsOutput>, AppError> {
    Ok(Json(collect_stats(state.store.as_ref()).await?))
}
