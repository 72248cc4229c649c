//! Background writer for chat exchanges.
//!
//! Delivery is best-effort: entries are appended in the order they were
//! queued, a failed write is logged and dropped, and anything still queued
//! when the runtime shuts down is lost. Callers never see an error.

use app_schema::chat_log::NewChatLog;
use app_store::RecordStore;
use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::*;

enum LogCommand {
    Append(NewChatLog),
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct ChatLogger {
    sender: mpsc::UnboundedSender<LogCommand>,
}

impl ChatLogger {
    /// Starts the writer task. It stops once every `ChatLogger` clone is dropped.
    pub fn spawn(store: Arc<dyn RecordStore>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(store, receiver));
        (Self { sender }, handle)
    }

    pub fn log(&self, user_message: &str, bot_response: &str, understood: bool) {
        let entry = NewChatLog {
            user_message: user_message.to_owned(),
            bot_response: bot_response.to_owned(),
            understood,
        };
        if self.sender.send(LogCommand::Append(entry)).is_err() {
            warn!("Chat log writer is gone; dropping entry");
        }
    }

    /// Resolves once every entry queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(LogCommand::Flush(done)).is_err() {
            return;
        }
        let _ = wait.await;
    }
}

async fn run_writer(store: Arc<dyn RecordStore>, mut receiver: mpsc::UnboundedReceiver<LogCommand>) {
    debug!("Chat log writer started");
    while let Some(command) = receiver.recv().await {
        match command {
            LogCommand::Append(entry) => {
                if let Err(e) = store.append_chat_log(&entry).await {
                    warn!("Error logging conversation: {}", e);
                }
            }
            LogCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Chat log writer stopped");
}

#[cfg(test)]
mod test {
    use super::*;
    use app_error::AppError;
    use app_schema::{
        auth::users::AdminUser,
        chat_log::{ChatLog, MessageFrequency},
        qa::{NewQaPair, QaPair},
    };
    use app_store::{AdminUserStore, ChatLogStore, QaStore, SqliteStore};
    use async_trait::async_trait;

    #[tokio::test]
    async fn entries_reach_the_store_in_order() {
        let store = Arc::new(SqliteStore::connect("sqlite::memory:", 1).await.unwrap());
        let (logger, _handle) = ChatLogger::spawn(store.clone());
        logger.log("oracle", "partner", true);
        logger.log("xyzxyz", "fallback", false);
        logger.flush().await;

        assert_eq!(store.count_chat_logs().await.unwrap(), 2);
        let logs = store.list_chat_logs().await.unwrap();
        assert_eq!(logs[1].user_message, "oracle");
        assert_eq!(logs[0].bot_response, "fallback");
    }

    /// Store whose log writes always fail.
    struct BrokenStore;

    #[async_trait]
    impl QaStore for BrokenStore {
        async fn list_qa_pairs(&self) -> Result<Vec<QaPair>, AppError> {
            Ok(vec![])
        }
        async fn insert_qa_pair(&self, _qa: &NewQaPair) -> Result<i64, AppError> {
            Err(AppError::internal("down"))
        }
        async fn update_qa_pair(&self, _id: i64, _qa: &NewQaPair) -> Result<bool, AppError> {
            Err(AppError::internal("down"))
        }
        async fn delete_qa_pair(&self, _id: i64) -> Result<bool, AppError> {
            Err(AppError::internal("down"))
        }
    }

    #[async_trait]
    impl ChatLogStore for BrokenStore {
        async fn append_chat_log(&self, _entry: &NewChatLog) -> Result<i64, AppError> {
            Err(AppError::internal("down"))
        }
        async fn list_chat_logs(&self) -> Result<Vec<ChatLog>, AppError> {
            Ok(vec![])
        }
        async fn count_chat_logs(&self) -> Result<i64, AppError> {
            Ok(0)
        }
        async fn count_by_understood(&self) -> Result<(i64, i64), AppError> {
            Ok((0, 0))
        }
        async fn top_messages(
            &self,
            _understood: bool,
            _limit: i64,
        ) -> Result<Vec<MessageFrequency>, AppError> {
            Ok(vec![])
        }
    }

    #[async_trait]
    impl AdminUserStore for BrokenStore {
        async fn find_admin_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<AdminUser>, AppError> {
            Ok(None)
        }
        async fn insert_admin(
            &self,
            _username: &str,
            _email: &str,
            _password_hash: &str,
        ) -> Result<AdminUser, AppError> {
            Err(AppError::internal("down"))
        }
        async fn ensure_admin(
            &self,
            _username: &str,
            _email: &str,
            _password_hash: &str,
        ) -> Result<bool, AppError> {
            Err(AppError::internal("down"))
        }
    }

    #[tokio::test]
    async fn write_failures_are_swallowed() {
        let (logger, handle) = ChatLogger::spawn(Arc::new(BrokenStore));
        logger.log("hola", "fallback", false);
        logger.flush().await;
        // writer survives the failure
        logger.log("hola", "fallback", false);
        logger.flush().await;
        drop(logger);
        handle.await.unwrap();
    }
}
