use async_trait::async_trait;
use thiserror::Error;

use crate::types::JobPage;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: '{0}'")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Request timed out: '{0}'")]
    Timeout(String),
    #[error("Failed to retrieve jobs from: '{url}', status: {status}")]
    RequestNotOk { url: String, status: u16 },
    #[error("Invalid response body: '{0}'")]
    InvalidBody(String),
}

/// Remote listing of job postings, served one page at a time
#[async_trait]
pub trait PageSource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<JobPage>;
}
