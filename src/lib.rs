//! Core library entry for the `picpush` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credential;
pub mod payload;
pub mod pipeline;
pub mod ports;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["picpush", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_push_argument() {
        let result = run(["picpush", "push"]);
        assert!(result.is_err());
    }
}
