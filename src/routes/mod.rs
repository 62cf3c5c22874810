mod error;
pub mod export;
pub mod gps;
pub mod health_check;
pub mod media;
pub mod sentiments;
pub mod vlogs;

pub use error::ApiError;
