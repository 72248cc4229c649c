use app_dto::admin::stats::StatsOutput;
use app_error::AppError;
use app_store::RecordStore;

pub const TOP_LIMIT: i64 = 5;

pub async fn collect_stats(store: &dyn RecordStore) -> Result<StatsOutput, AppError> {
    let total_conversations = store.count_chat_logs().await?;
    let (understood, not_understood) = store.count_by_understood().await?;
    let top_questions = store.top_messages(true, TOP_LIMIT).await?;
    let missed_questions = store.top_messages(false, TOP_LIMIT).await?;
    Ok(StatsOutput {
        total_conversations,
        understood,
        not_understood,
        top_questions,
        missed_questions,
    })
}
