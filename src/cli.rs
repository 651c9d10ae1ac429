use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Report(Verbosity),
    Help,
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut verbosity = Verbosity::Normal;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--verbose" => verbosity = Verbosity::Verbose,
            "-q" | "--quiet" => verbosity = Verbosity::Quiet,
            other => bail!("Unknown argument: {other}\n\nRun with --help for usage."),
        }
    }
    Ok(Command::Report(verbosity))
}

pub fn print_help() {
    println!("ado-backlog — list open work items of an Azure DevOps project by priority\n");
    println!("USAGE:");
    println!("  ado-backlog [-v | -q]");
    println!();
    println!("OPTIONS:");
    println!("  -v, --verbose  Log HTTP activity to stderr");
    println!("  -q, --quiet    Only log errors to stderr");
    println!("  -h, --help     Show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("  ADO_ORG_URL    Organization URL, e.g. https://dev.azure.com/MyOrg");
    println!("  ADO_PROJECT    Project name");
    println!("  ADO_PAT        Personal access token");
    println!("  BACKLOG_LOG    Tracing filter, overrides -v/-q");
    println!();
    println!("Values can also come from a .env file or {}", crate::config::config_path().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_reports_with_default_verbosity() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Report(Verbosity::Normal));
    }

    #[test]
    fn verbose_and_quiet_flags() {
        assert_eq!(
            parse_args(&args(&["--verbose"])).unwrap(),
            Command::Report(Verbosity::Verbose)
        );
        assert_eq!(parse_args(&args(&["-q"])).unwrap(), Command::Report(Verbosity::Quiet));
    }

    #[test]
    fn last_verbosity_flag_wins() {
        assert_eq!(
            parse_args(&args(&["-v", "-q"])).unwrap(),
            Command::Report(Verbosity::Quiet)
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(&args(&["-v", "--help", "--bogus"])).unwrap(), Command::Help);
    }

    #[test]
    fn unknown_argument_fails() {
        let result = parse_args(&args(&["--limit", "10"]));
        assert!(result.unwrap_err().to_string().contains("Unknown argument: --limit"));
    }

    #[test]
    fn filter_strings() {
        assert_eq!(Verbosity::Quiet.as_filter_str(), "error");
        assert_eq!(Verbosity::default().as_filter_str(), "warn");
        assert_eq!(Verbosity::Verbose.as_filter_str(), "debug");
    }
}
