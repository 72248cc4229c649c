use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One logged chat exchange. `timestamp` is UTC as written by SQLite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChatLog {
    pub id: i64,
    pub user_message: String,
    pub bot_response: String,
    pub understood: bool,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatLog {
    pub user_message: String,
    pub bot_response: String,
    pub understood: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MessageFrequency {
    pub user_message: String,
    pub frequency: i64,
}

impl ChatLog {
    #[inline]
    pub fn select_base() -> &'static str {
        include_str!("../../../SQL/chat_logs/select_base.sql")
    }

    #[inline]
    pub fn insert() -> &'static str {
        include_str!("../../../SQL/chat_logs/insert.sql")
    }

    #[inline]
    pub fn count_by_understood() -> &'static str {
        include_str!("../../../SQL/chat_logs/count_by_understood.sql")
    }

    #[inline]
    pub fn top_messages() -> &'static str {
        include_str!("../../../SQL/chat_logs/top_messages.sql")
    }
}
