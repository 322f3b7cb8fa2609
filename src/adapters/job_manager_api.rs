//! Job manager REST client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::error::AppError;
use crate::ports::{JobManagerApi, JobOverview};

const TIMEOUT_SECS: u64 = 5;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u64 = 200;

/// Blocking HTTP client for the job manager's REST endpoint.
///
/// Targets `http://127.0.0.1:<port>` for the manuscript's exposed port; the
/// `MANUSCRIPT_API_URL` environment variable overrides the base URL.
#[derive(Debug, Clone)]
pub struct HttpJobManagerClient {
    client: Client,
    base_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    #[serde(default)]
    jobs: Vec<JobOverview>,
}

impl HttpJobManagerClient {
    pub fn new() -> Result<Self, AppError> {
        let base_override = match std::env::var("MANUSCRIPT_API_URL") {
            Ok(value) => Some(
                Url::parse(&value)
                    .map_err(|e| AppError::Api(format!("Invalid MANUSCRIPT_API_URL: {e}")))?,
            ),
            Err(_) => None,
        };
        Self::build(base_override)
    }

    /// Create a client pinned to a base URL, for tests.
    pub fn with_base_url(base: Url) -> Result<Self, AppError> {
        Self::build(Some(base))
    }

    fn build(base_override: Option<Url>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Api(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, base_override })
    }

    fn overview_url(&self, port: u16) -> Result<Url, AppError> {
        let base = match &self.base_override {
            Some(base) => base.clone(),
            None => Url::parse(&format!("http://127.0.0.1:{port}"))
                .map_err(|e| AppError::Api(format!("Invalid job manager address: {e}")))?,
        };
        base.join("jobs/overview")
            .map_err(|e| AppError::Api(format!("Invalid job manager address: {e}")))
    }

    fn fetch(&self, url: &Url) -> Result<Vec<JobOverview>, AppError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| AppError::Api(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let body: OverviewResponse = response
                .json()
                .map_err(|e| AppError::Api(format!("Failed to parse response: {e}")))?;
            Ok(body.jobs)
        } else if status.is_server_error() {
            Err(AppError::Api(format!("Server error ({})", status.as_u16())))
        } else {
            Err(AppError::Api(format!("API error ({})", status.as_u16())))
        }
    }

    fn is_retryable(error: &AppError) -> bool {
        match error {
            AppError::Api(message) => {
                message.contains("Server error") || message.contains("timed out")
            }
            _ => false,
        }
    }
}

impl JobManagerApi for HttpJobManagerClient {
    fn list_jobs(&self, port: u16) -> Result<Vec<JobOverview>, AppError> {
        let url = self.overview_url(port)?;

        let mut last_error = None;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * 2_u64.pow(attempt - 1);
                std::thread::sleep(Duration::from_millis(delay));
            }

            match self.fetch(&url) {
                Ok(jobs) => return Ok(jobs),
                Err(e) if Self::is_retryable(&e) => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Api("Request failed after all retries".into())))
    }
}
