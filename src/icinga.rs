//! Icinga2 `CheckCommand` generation.
//!
//! Setting the `GENERATE_ICINGA_COMMAND` environment variable makes the
//! check print a ready-to-import `CheckCommand` object derived from its own
//! CLI definition and exit, instead of running the probe.

#[derive(Debug, thiserror::Error)]
pub enum IcingaCommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
    #[error("argument '{0}' is missing a long name")]
    MissingLongName(String),
}

struct Argument {
    flag: String,
    variable: String,
    description: Option<String>,
    is_flag: bool,
    default_value: Option<String>,
}

/// Renders the Icinga2 CheckCommand object for the given clap command.
/// Flags (`SetTrue` actions) become `set_if` arguments, everything else
/// takes a value. Built-in help/version arguments are skipped.
pub fn command_config(name: &str, cmd: &clap::Command) -> Result<String, IcingaCommandError> {
    let current_exe = std::env::current_exe()?;
    let current_exe = current_exe
        .to_str()
        .ok_or(IcingaCommandError::InvalidExecutablePath)?;

    let arguments = arguments(cmd)?;

    let mut out = format!("object CheckCommand \"{name}\" {{\n");
    out.push_str(&format!("  command = [ \"{current_exe}\" ]\n"));
    out.push_str("  arguments = {\n");

    for arg in &arguments {
        out.push_str(&format!("  \"--{}\" = {{\n", arg.flag));

        if arg.is_flag {
            out.push_str(&format!("    set_if = \"${}$\"\n", arg.variable));
        } else {
            out.push_str(&format!("    value = \"${}$\"\n", arg.variable));
        }

        if let Some(description) = &arg.description {
            out.push_str(&format!(
                "    description = \"{}\"\n",
                escape_string(description)
            ));
        }

        out.push_str("  }\n");
    }

    out.push('\n');

    for arg in &arguments {
        if let Some(default_value) = &arg.default_value {
            out.push_str(&format!(
                "  vars.{} = \"{}\"\n",
                arg.variable,
                escape_string(default_value)
            ));
        }
    }

    out.push_str("}\n");
    Ok(out)
}

/// Print the Icinga command configuration if the GENERATE_ICINGA_COMMAND
/// environment variable is set and exit the process.
pub fn print_command_config_if_env_and_exit(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), IcingaCommandError> {
    if std::env::var("GENERATE_ICINGA_COMMAND").is_err() {
        return Ok(());
    }

    let out = command_config(name, cmd)?;
    println!("{}", out.trim());
    std::process::exit(0);
}

fn arguments(cmd: &clap::Command) -> Result<Vec<Argument>, IcingaCommandError> {
    let mut arguments = Vec::new();

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_str();
        if id == "help" || id == "version" {
            continue;
        }

        let flag = arg
            .get_long()
            .ok_or_else(|| IcingaCommandError::MissingLongName(id.to_owned()))?
            .to_owned();

        let variable = flag.replace('-', "_");
        let description = arg.get_help().map(|s| s.to_string());
        let is_flag = matches!(arg.get_action(), &clap::ArgAction::SetTrue);
        let default_value = arg
            .get_default_values()
            .first()
            .and_then(|v| v.to_str())
            .map(|s| s.to_owned());

        arguments.push(Argument {
            flag,
            variable,
            description,
            is_flag,
            default_value,
        });
    }

    Ok(arguments)
}

fn escape_string(s: &str) -> String {
    ["\"", "$"]
        .iter()
        .fold(s.to_owned(), |acc, c| acc.replace(c, &format!("\\{}", c)))
}

#[cfg(test)]
mod tests {
    use clap::{Arg, ArgAction, Command};

    use super::{command_config, escape_string};

    fn example_command() -> Command {
        Command::new("example")
            .arg(
                Arg::new("url")
                    .short('u')
                    .long("url")
                    .help("URL of the endpoint"),
            )
            .arg(
                Arg::new("hours")
                    .long("hours")
                    .default_value("24")
                    .help("Lookback window"),
            )
            .arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue))
            .arg(Arg::new("help").long("help").action(ArgAction::HelpLong))
    }

    #[test]
    fn test_command_config() {
        let out = command_config("check_example", &example_command()).unwrap();

        assert!(out.starts_with("object CheckCommand \"check_example\" {"));
        assert!(out.contains("\"--url\" = {"));
        assert!(out.contains("value = \"$url$\""));
        assert!(out.contains("description = \"URL of the endpoint\""));
        assert!(out.contains("set_if = \"$verbose$\""));
        assert!(out.contains("vars.hours = \"24\""));
        // The built-in help argument must not leak into the command.
        assert!(!out.contains("--help"));
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("a \"b\" $c$"), "a \\\"b\\\" \\$c\\$");
    }
}
