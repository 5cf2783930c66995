//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// permgate - named user permissions and ability checks
#[derive(Parser, Debug)]
#[command(name = "permgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PERMGATE_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check an ability expression against a user's grants
    Check {
        /// Ability expression, e.g. "edit-post|delete-post"
        ability: String,

        /// JSON file with the user's grants
        #[arg(short, long)]
        grants: PathBuf,

        /// Result of earlier authorization rules, if any
        #[arg(long, value_enum)]
        prior: Option<Prior>,
    },

    /// Show the restrictions attached to one permission
    Restrictions {
        /// Permission name
        name: String,

        /// JSON file with the user's grants
        #[arg(short, long)]
        grants: PathBuf,
    },

    /// List the defined permissions
    Vocabulary,

    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Write a default config file
    Init {
        /// Where to write it (defaults to the resolved config path)
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Outcome of earlier rules passed to `check`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prior {
    /// An earlier rule allowed
    Allow,
    /// An earlier rule denied
    Deny,
}

impl Prior {
    /// As the checker's prior result.
    pub fn as_result(self) -> bool {
        matches!(self, Prior::Allow)
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
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "permgate",
            "check",
            "edit-post|delete-post",
            "--grants",
            "grants.json",
            "--prior",
            "deny",
        ])
        .unwrap();
        match cli.command {
            Command::Check {
                ability,
                grants,
                prior,
            } => {
                assert_eq!(ability, "edit-post|delete-post");
                assert_eq!(grants, PathBuf::from("grants.json"));
                assert_eq!(prior, Some(Prior::Deny));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["permgate", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Init { force: true, .. }
            }
        ));
    }

    #[test]
    fn test_prior_as_result() {
        assert!(Prior::Allow.as_result());
        assert!(!Prior::Deny.as_result());
    }
}
