//! # permgate-cli
//!
//! Admin CLI for permgate:
//! - Checking ability expressions against a user's grants
//! - Inspecting permission restrictions
//! - Listing the defined vocabulary
//! - Config file management

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;

pub use cli::Cli;
pub use commands::run;
