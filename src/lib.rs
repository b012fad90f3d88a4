pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{Error, Result};
