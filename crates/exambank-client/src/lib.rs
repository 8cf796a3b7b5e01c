//! exambank-client: configuration and platform API access.
//!
//! Implements the `QuestionBank` trait over HTTP, plus an in-memory mock for
//! tests.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use api::{BulkSubmitResponse, DashboardStats, NewExam, QuestionBank, QuestionPayload};
pub use config::{load_config, load_config_from, ApiConfig, ExambankConfig};
pub use error::ApiError;
pub use http::HttpQuestionBank;
pub use mock::MockQuestionBank;
