use std::time::Duration;

use chrono::Local;
use serde_json::Value;
use tracing::debug;

use crate::check::{Metric, METRIC_NAME};

/// Explicit request timeout. The monitoring system enforces its own, much
/// larger timeout by killing the process, so this only has to beat that.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable probe inputs, supplied once at invocation.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// URL of the scheduler's `jobRecords` REST endpoint.
    pub url: String,
    /// Bearer token expected by the endpoint.
    pub token: String,
    /// Name of the scheduled job to count executions for.
    pub jobname: String,
    /// Trailing window in hours within which executions are counted.
    pub hours: i64,
    /// Whether to verify the TLS certificate of the endpoint.
    pub ssl_verify: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("request to scheduler failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("scheduler returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("could not parse response as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of job records, got {0}")]
    UnexpectedBody(&'static str),
}

/// The job executions resource. One probe produces one [Metric]: the number
/// of matching job execution records. The records themselves are opaque.
pub struct JobExecutions {
    config: ProbeConfig,
}

impl JobExecutions {
    pub fn new(config: ProbeConfig) -> Self {
        JobExecutions { config }
    }

    /// Queries the scheduler for successful executions of the configured
    /// job within the lookback window and returns their count.
    pub fn probe(&self) -> Result<Metric, ProbeError> {
        let started_after = (Local::now() - chrono::Duration::hours(self.config.hours))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        debug!(url = %self.config.url, %started_after, "querying job records");

        // A fresh client per invocation: the verify flag stays scoped to
        // this one request instead of leaking into process-wide state.
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!self.config.ssl_verify)
            .build()?;

        let response = client
            .get(&self.config.url)
            .bearer_auth(&self.config.token)
            .query(&[
                ("job", self.config.jobname.as_str()),
                ("startedAfter", started_after.as_str()),
                ("result", "SUCCESS"),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status));
        }

        let body = response.text()?;
        let records = match serde_json::from_str::<Value>(&body)? {
            Value::Array(records) => records,
            other => return Err(ProbeError::UnexpectedBody(json_type(&other))),
        };
        debug!(count = records.len(), "job records received");

        Ok(Metric::new(METRIC_NAME, records.len() as u64))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
