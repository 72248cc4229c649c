pub mod questions;
pub mod stats;
