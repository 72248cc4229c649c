pub mod auth;
pub mod chat_log;
pub mod qa;
