//! Record store contract.
//!
//! Handlers and the chat logger only see these traits through
//! `Arc<dyn RecordStore>`; [`sqlite::SqliteStore`] is the shipped backend.
//! A document-store backend would implement the same three traits.

pub mod sqlite;

use app_error::AppError;
use app_schema::{
    auth::users::AdminUser,
    chat_log::{ChatLog, MessageFrequency, NewChatLog},
    qa::{NewQaPair, QaPair},
};
use async_trait::async_trait;

pub use sqlite::SqliteStore;

#[async_trait]
pub trait QaStore: Send + Sync {
    /// All records in id order. The matcher relies on this order for ties.
    async fn list_qa_pairs(&self) -> Result<Vec<QaPair>, AppError>;

    async fn insert_qa_pair(&self, qa: &NewQaPair) -> Result<i64, AppError>;

    /// Returns `false` when no record has `id`.
    async fn update_qa_pair(&self, id: i64, qa: &NewQaPair) -> Result<bool, AppError>;

    /// Returns `false` when no record has `id`.
    async fn delete_qa_pair(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ChatLogStore: Send + Sync {
    async fn append_chat_log(&self, entry: &NewChatLog) -> Result<i64, AppError>;

    /// Newest first.
    async fn list_chat_logs(&self) -> Result<Vec<ChatLog>, AppError>;

    async fn count_chat_logs(&self) -> Result<i64, AppError>;

    /// `(understood, not_understood)`.
    async fn count_by_understood(&self) -> Result<(i64, i64), AppError>;

    /// Most frequent exact messages with the given flag.
    async fn top_messages(
        &self,
        understood: bool,
        limit: i64,
    ) -> Result<Vec<MessageFrequency>, AppError>;
}

#[async_trait]
pub trait AdminUserStore: Send + Sync {
    async fn find_admin_by_username(&self, username: &str)
    -> Result<Option<AdminUser>, AppError>;

    /// Fails with a conflict when username or email is taken.
    async fn insert_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminUser, AppError>;

    /// Creates the account unless the username or email exists. Returns whether a row was added.
    async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AppError>;
}

pub trait RecordStore: QaStore + ChatLogStore + AdminUserStore {}

impl<T> RecordStore for T where T: QaStore + ChatLogStore + AdminUserStore {}
