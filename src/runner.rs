use std::fmt::Display;

use crate::{Report, ServiceState};

/// Runs a check closure and turns an error into a printable plugin outcome
/// instead of an uncaught crash.
pub struct Runner<E> {
    name: String,
    on_error: Option<Box<dyn FnOnce(&E) -> ServiceState>>,
}

impl<E: Display> Runner<E> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            on_error: None,
        }
    }

    /// Overrides the service state reported for errors. The default is
    /// critical.
    pub fn on_error(mut self, f: impl FnOnce(&E) -> ServiceState + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Runs the given closure. An `Err` is mapped through the `on_error`
    /// handler and carried in the result together with the check name, so
    /// [RunnerResult::print_and_exit] can report it in the usual format.
    pub fn safe_run(self, f: impl FnOnce() -> Result<Report, E>) -> RunnerResult<E> {
        match f() {
            Ok(report) => RunnerResult::Ok(report),
            Err(err) => {
                let state = self
                    .on_error
                    .map(|f| f(&err))
                    .unwrap_or(ServiceState::Critical);

                RunnerResult::Err(self.name, state, err)
            }
        }
    }
}

pub enum RunnerResult<E> {
    Ok(Report),
    Err(String, ServiceState, E),
}

impl<E: Display> RunnerResult<E> {
    pub fn state(&self) -> ServiceState {
        match self {
            RunnerResult::Ok(report) => report.state(),
            RunnerResult::Err(_, state, _) => *state,
        }
    }

    /// The status line for this outcome. Errors follow the same
    /// `<NAME> <STATE> - <text>` shape as regular reports.
    pub fn status_line(&self) -> String {
        match self {
            RunnerResult::Ok(report) => report.status_line(),
            RunnerResult::Err(name, state, err) => format!("{} {} - {}", name, state, err),
        }
    }

    pub fn print_and_exit(self) -> ! {
        println!("{}", self.status_line());
        std::process::exit(self.state().exit_code());
    }
}
