pub mod client;
pub mod models;

pub use client::BlockscoutClient;
pub use models::{ApiError, Record};
