use serde::Deserialize;

use crate::error::AppError;

/// One job as reported by the job manager's `/jobs/overview` endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct JobOverview {
    #[serde(rename = "jid")]
    pub id: String,
    pub name: String,
    pub state: String,
    /// Start time in epoch milliseconds.
    #[serde(rename = "start-time")]
    pub start_time: i64,
}

/// Abstraction over the job manager's REST API.
pub trait JobManagerApi {
    /// List the jobs running on the job manager exposed at `port`.
    fn list_jobs(&self, port: u16) -> Result<Vec<JobOverview>, AppError>;
}
