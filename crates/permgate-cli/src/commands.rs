//! Handlers for the permission commands.

use std::path::Path;
use std::process::ExitCode;

use permgate_core::{
    Error, Permission, PermissionChecker, PermissionSet, PermgateConfig, RestrictionResult,
    Result, Verdict, lookup_restrictions,
};

use crate::cli::{Cli, Command, Prior};
use crate::config_handlers::handle_config_command;

/// Run a parsed command line.
///
/// `check` exits 1 when the gate abstains; everything else exits 0 on success.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Check {
            ability,
            grants,
            prior,
        } => {
            let config = PermgateConfig::load(config_path)?;
            let verdict = cmd_check(&config, &ability, &grants, prior)?;
            match verdict {
                Verdict::Allow => {
                    println!("allow");
                    Ok(ExitCode::SUCCESS)
                }
                Verdict::Abstain => {
                    println!("abstain");
                    Ok(ExitCode::from(1))
                }
            }
        }
        Command::Restrictions { name, grants } => {
            let result = cmd_restrictions(&name, &grants)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Vocabulary => {
            let config = PermgateConfig::load(config_path)?;
            for name in config.vocabulary()?.iter() {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Check `ability` for the grants stored in `grants_path`.
pub fn cmd_check(
    config: &PermgateConfig,
    ability: &str,
    grants_path: &Path,
    prior: Option<Prior>,
) -> Result<Verdict> {
    let checker = PermissionChecker::new(config.vocabulary()?);
    let grants = load_grants(grants_path)?;
    checker.check(&grants, ability, prior.map(Prior::as_result))
}

/// Look up the restrictions on `name` in the grants stored in `grants_path`.
pub fn cmd_restrictions(name: &str, grants_path: &Path) -> Result<RestrictionResult> {
    let grants = load_grants(grants_path)?.to_vec();
    Ok(lookup_restrictions(Some(grants.as_slice()), name))
}

/// Read a JSON array of grant records.
pub fn load_grants(path: &Path) -> Result<PermissionSet> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let records: Vec<Permission> = serde_json::from_str(&content)?;
    log::debug!("Loaded {} grants from {}", records.len(), path.display());
    PermissionSet::from_records(records)
}
