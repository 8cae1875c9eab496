//! A nagios/icinga check which counts the successful executions of a
//! scheduled job by querying the scheduler's REST API.
//!
//! The probe issues a single authenticated GET against the `jobRecords`
//! endpoint, filtered by job name, a trailing time window and
//! `result=SUCCESS`. The number of returned records is the metric; it is
//! evaluated against a warning and a critical [`Range`] and reported as a
//! single status line plus perfdata:
//!
//! ```text
//! JOBEXECUTIONS OK - Successful Job Executions is 5 | 'Successful Job Executions'=5;1:;1:
//! ```
//!
//! Runtime failures (network, HTTP status, JSON) are caught by the
//! [`Runner`] and reported as UNKNOWN with exit code 3.

use std::cmp::Ordering;
use std::fmt;

mod check;
mod helper;
mod probe;
mod range;
mod runner;

pub mod icinga;

pub use crate::check::{Metric, Report, CHECK_NAME, METRIC_NAME};
pub use crate::helper::safe_run;
pub use crate::probe::{JobExecutions, ProbeConfig, ProbeError, REQUEST_TIMEOUT};
pub use crate::range::{Range, RangeParseError};
pub use crate::runner::{Runner, RunnerResult};

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl PartialOrd for ServiceState {
    fn partial_cmp(&self, other: &ServiceState) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServiceState {
    fn cmp(&self, other: &ServiceState) -> Ordering {
        let f = |state: &ServiceState| match state {
            ServiceState::Unknown => 0,
            ServiceState::Ok => 1,
            ServiceState::Warning => 2,
            ServiceState::Critical => 3,
        };

        f(self).cmp(&f(other))
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceState;

    #[test]
    fn test_state() {
        assert_eq!(ServiceState::Ok.exit_code(), 0);
        assert_eq!(ServiceState::Warning.exit_code(), 1);
        assert_eq!(ServiceState::Critical.exit_code(), 2);
        assert_eq!(ServiceState::Unknown.exit_code(), 3);

        assert_eq!(&ServiceState::Ok.to_string(), "OK");
        assert_eq!(&ServiceState::Warning.to_string(), "WARNING");
        assert_eq!(&ServiceState::Critical.to_string(), "CRITICAL");
        assert_eq!(&ServiceState::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_state_ordering() {
        assert!(ServiceState::Unknown < ServiceState::Ok);
        assert!(ServiceState::Ok < ServiceState::Warning);
        assert!(ServiceState::Warning < ServiceState::Critical);
    }
}
