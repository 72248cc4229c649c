pub mod csv;
pub mod stats;
