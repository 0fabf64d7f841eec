//! Configuration management commands.
//!
//! `config get`, `config set`, `config list` and `config path` read and edit
//! the INI file without opening it by hand.

use clap::Subcommand;
use pulseboard::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Key in section.key form (e.g., api.base_url)
        key: String,
    },

    /// Change one setting
    Set {
        /// Key in section.key form (e.g., refresh.interval)
        key: String,

        /// New value
        value: String,
    },

    /// Print every setting
    List,

    /// Print the configuration file path
    Path,
}

pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'pulseboard config list' to see available keys.",
            key
        ))
    })
}

fn run_get(key: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load()?;
    println!("{}", config_key.get(&config));
    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load()?;
    config_key.set(&mut config, value)?;
    config.save()?;

    println!("Set {} = {}", config_key.name(), config_key.get(&config));
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    print!("{}", render_listing(&config));
    Ok(())
}

/// Settings grouped under `[section]` headers, in file order.
fn render_listing(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();
        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }
        out.push_str(&format!("  {} = {}\n", key.key_name(), key.get(config)));
    }

    out
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_message_points_to_list() {
        let err = parse_key("api.token").unwrap_err();
        assert!(err.to_string().contains("pulseboard config list"));
    }

    #[test]
    fn test_listing_groups_by_section() {
        let listing = render_listing(&ConfigFile::default());

        assert!(listing.starts_with("[api]\n  base_url = http://localhost:8080/api\n"));
        assert!(listing.contains("\n[refresh]\n  interval = 30\n"));
        assert!(listing.contains("\n[logging]\n"));
        assert_eq!(listing.matches('[').count(), 3);
    }
}
