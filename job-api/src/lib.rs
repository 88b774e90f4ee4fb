use std::time::Duration;

use async_trait::async_trait;
use job_board::{FetchError, JobPage, PageSource};
use reqwest::Client;

fn job_list_url(base_url: &str, page: u32, limit: u32) -> String {
    format!(
        "{}/api/jobs?page={}&limit={}",
        base_url.trim_end_matches('/'),
        page,
        limit
    )
}

fn request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(e.to_string())
    } else {
        FetchError::Request(Box::new(e))
    }
}

/// Job listing served over HTTP at `{base_url}/api/jobs`
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<JobPage, FetchError> {
        let url = job_list_url(&self.base_url, page, limit);
        log::debug!("requesting jobs, page: {}, limit: {}", page, limit);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;
        let status = resp.status();
        if !status.is_success() {
            let error_body = resp.text().await;
            log::error!(
                "failed to retrieve jobs for page: {}, status: {}, error resp body: {:?}",
                page,
                status,
                error_body,
            );
            return Err(FetchError::RequestNotOk {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(request_error)?;
        let job_page: JobPage =
            serde_json::from_str(&body).map_err(|e| FetchError::InvalidBody(e.to_string()))?;
        log::debug!(
            "successfully retrieved {} jobs for page: {}",
            job_page.jobs.len(),
            page
        );
        Ok(job_page)
    }
}
