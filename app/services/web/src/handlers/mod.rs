pub mod chat;
pub mod export;
pub mod index;
pub mod login;
pub mod questions;
pub mod stats;
pub mod user;
