use std::fmt::Display;

use crate::{Report, Runner, RunnerResult, ServiceState};

/// Runs the given closure and reports an `Err` with the given service state
/// after printing out the error message, instead of propagating it.
pub fn safe_run<E: Display>(
    name: &str,
    f: impl FnOnce() -> Result<Report, E>,
    error_state: ServiceState,
) -> RunnerResult<E> {
    Runner::new(name)
        .on_error(move |_| error_state)
        .safe_run(f)
}

#[cfg(test)]
mod tests {
    use super::safe_run;
    use crate::ServiceState;

    #[derive(Debug, thiserror::Error)]
    #[error("it broke")]
    struct EmptyError;

    #[test]
    fn test_safe_run_reports_given_state() {
        let result = safe_run("TEST", || Err(EmptyError), ServiceState::Unknown);
        assert_eq!(result.state(), ServiceState::Unknown);
        assert_eq!(&result.status_line(), "TEST UNKNOWN - it broke");
    }
}
