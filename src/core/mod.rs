pub mod content;
pub mod context;
pub mod models;
pub mod persist;
pub mod types;
