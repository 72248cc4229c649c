use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QaPair {
    pub id: i64,
    pub question: String,
    pub keywords: String,
    pub answer: String,
    pub created_at: NaiveDateTime,
}

/// Fields an admin supplies when creating or replacing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQaPair {
    pub question: String,
    pub keywords: String,
    pub answer: String,
}

impl QaPair {
    /// Comma-separated keywords, trimmed and lowercased, empties dropped.
    pub fn keyword_list(&self) -> Vec<String> {
        split_keywords(&self.keywords)
    }

    #[inline]
    pub fn select_base() -> &'static str {
        include_str!("../../../SQL/qa_pairs/select_base.sql")
    }

    #[inline]
    pub fn insert() -> &'static str {
        include_str!("../../../SQL/qa_pairs/insert.sql")
    }

    #[inline]
    pub fn update() -> &'static str {
        include_str!("../../../SQL/qa_pairs/update.sql")
    }

    #[inline]
    pub fn delete() -> &'static str {
        include_str!("../../../SQL/qa_pairs/delete.sql")
    }
}

pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
