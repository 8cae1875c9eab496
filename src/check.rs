use std::process;

use crate::{Range, ServiceState};

/// Check name, prefixed to every status line.
pub const CHECK_NAME: &str = "JOBEXECUTIONS";

/// Label of the one metric this check produces.
pub const METRIC_NAME: &str = "Successful Job Executions";

/// A single named observation. Exactly one is produced per run, or the run
/// fails before producing one.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    name: String,
    value: u64,
}

impl Metric {
    pub fn new(name: &str, value: u64) -> Self {
        Metric {
            name: name.to_owned(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

/// The evaluated outcome of one check run: the metric together with the
/// thresholds it was measured against and the resulting service state.
#[derive(Clone, Debug)]
pub struct Report {
    state: ServiceState,
    metric: Metric,
    warn: Range,
    crit: Range,
}

impl Report {
    /// Evaluates the metric against both ranges. A value outside the
    /// critical range is critical regardless of the warning range.
    pub fn evaluate(metric: Metric, warn: Range, crit: Range) -> Self {
        let value = metric.value() as f64;
        let state = if !crit.contains(value) {
            ServiceState::Critical
        } else if !warn.contains(value) {
            ServiceState::Warning
        } else {
            ServiceState::Ok
        };

        Report {
            state,
            metric,
            warn,
            crit,
        }
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// Returns the status line which nagios understands, perfdata included.
    pub fn status_line(&self) -> String {
        format!(
            "{} {} - {} is {} | {}",
            CHECK_NAME,
            self.state,
            self.metric.name(),
            self.metric.value(),
            self.perf_string()
        )
    }

    fn perf_string(&self) -> String {
        let s = format!(
            "{}={};{};{}",
            perf_label(self.metric.name()),
            self.metric.value(),
            self.warn,
            self.crit
        );
        s.trim_end_matches(';').to_string()
    }

    /// Will print [Report::status_line] and exit with the code from the
    /// determined state.
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.status_line());
        process::exit(self.state.exit_code());
    }
}

// Perfdata labels must not contain `=`, quotes are doubled and labels with
// spaces are wrapped in single quotes.
fn perf_label(name: &str) -> String {
    let name = name.replace('=', "_").replace('\'', "''");

    if name.contains(' ') {
        format!("'{}'", name)
    } else {
        name
    }
}
