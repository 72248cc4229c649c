use app_schema::chat_log::MessageFrequency;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOutput {
    pub total_conversations: i64,
    pub understood: i64,
    pub not_understood: i64,
    pub top_questions: Vec<MessageFrequency>,
    pub missed_questions: Vec<MessageFrequency>,
}
