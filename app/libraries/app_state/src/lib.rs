use app_chat_logger::ChatLogger;
use app_config::AppConfig;
use app_store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn RecordStore>,
    pub chat_logger: ChatLogger,
}
