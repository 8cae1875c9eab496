use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use check_job_executions::{
    icinga, safe_run, JobExecutions, ProbeConfig, ProbeError, Range, Report, ServiceState,
    CHECK_NAME,
};

/// Nagios/Icinga check script for checking successful executions of
/// scheduled jobs.
///
/// `-h` selects the lookback window, as usual for this check; help is
/// available via `--help`.
#[derive(Parser)]
#[command(
    name = "check_job_executions",
    version,
    about = "Checks the number of successful executions of a scheduled job via the scheduler REST API",
    disable_help_flag = true
)]
struct Cli {
    /// URL of the scheduler REST API endpoint
    #[arg(short = 'u', long)]
    url: String,

    /// Token for authentication at the scheduler REST service
    #[arg(short = 't', long)]
    token: String,

    /// Name of the scheduled job to be monitored
    #[arg(short = 'j', long)]
    jobname: String,

    /// Time period in hours in which executions are counted
    #[arg(short = 'h', long, default_value_t = 24)]
    hours: u32,

    /// Range definition for warning. Default is "1:" (warning if less than 1)
    #[arg(short = 'w', long, default_value = "1:")]
    warn: Range,

    /// Range definition for critical. Default is "1:" (critical if less than 1)
    #[arg(short = 'c', long, default_value = "1:")]
    crit: Range,

    /// Verify the TLS certificate of the endpoint
    #[arg(short = 's', long, default_value_t = true, action = ArgAction::Set)]
    sslverify: bool,

    /// Print help
    #[arg(long, action = ArgAction::HelpLong)]
    #[allow(dead_code)]
    help: Option<bool>,
}

fn main() {
    // Diagnostics go to stderr; stdout carries nothing but the status line.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = icinga::print_command_config_if_env_and_exit("check_job_executions", &Cli::command()) {
        eprintln!("could not generate the icinga command configuration: {err}");
        std::process::exit(ServiceState::Unknown.exit_code());
    }

    let cli = Cli::parse();

    let probe = JobExecutions::new(ProbeConfig {
        url: cli.url,
        token: cli.token,
        jobname: cli.jobname,
        hours: i64::from(cli.hours),
        ssl_verify: cli.sslverify,
    });

    safe_run(
        CHECK_NAME,
        || Ok::<Report, ProbeError>(Report::evaluate(probe.probe()?, cli.warn, cli.crit)),
        ServiceState::Unknown,
    )
    .print_and_exit()
}
