//! Pulseboard CLI - live terminal dashboard for traffic metrics
//!
//! Thin front end over the `pulseboard` library: argument parsing, config
//! resolution and terminal presentation. All refresh and synchronization
//! logic lives in the library.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use commands::common::ConnectionArgs;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "pulseboard")]
#[command(version = pulseboard::VERSION)]
#[command(about = "Live dashboard for real-time traffic metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the live dashboard (default)
    Watch {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Print plain status lines instead of the interactive dashboard
        #[arg(long)]
        headless: bool,
    },

    /// Fetch one snapshot and print it
    Fetch {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Print the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => commands::watch::run(ConnectionArgs::default(), false),
        Some(Commands::Watch {
            connection,
            headless,
        }) => commands::watch::run(connection, headless),
        Some(Commands::Fetch { connection, json }) => commands::fetch::run(connection, json),
        Some(Commands::Config { command }) => commands::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_watch() {
        let cli = Cli::try_parse_from(["pulseboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_watch_overrides_parse() {
        let cli = Cli::try_parse_from([
            "pulseboard",
            "watch",
            "--base-url",
            "http://example.com/api",
            "--interval",
            "5",
            "--headless",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Watch {
                connection,
                headless,
            }) => {
                assert!(headless);
                assert_eq!(connection.base_url.as_deref(), Some("http://example.com/api"));
                assert_eq!(connection.interval, Some(5));
                assert_eq!(connection.timeout, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_interval_outside_range_is_rejected() {
        for value in ["0", "86401", "18446744073709551615"] {
            assert!(
                Cli::try_parse_from(["pulseboard", "watch", "--interval", value]).is_err(),
                "--interval {} should be rejected",
                value
            );
        }
        assert!(Cli::try_parse_from(["pulseboard", "fetch", "--timeout", "86400"]).is_ok());
    }

    #[test]
    fn test_config_set_parses() {
        let cli =
            Cli::try_parse_from(["pulseboard", "config", "set", "refresh.interval", "15"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }
}
