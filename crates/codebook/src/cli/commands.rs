//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Config;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Seed data file (overrides `data.path`)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Listen address, e.g. `:8080` or `127.0.0.1:8080` (overrides `APP_PORT`)
    #[arg(short, long, value_name = "ADDR")]
    pub address: Option<String>,
}

impl ServeCommand {
    /// Apply command-line overrides on top of loaded configuration.
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(data) = &self.data {
            config.data.path.clone_from(data);
        }
        if let Some(address) = &self.address {
            config.server.address.clone_from(address);
        }
        config
    }
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Seed data file (overrides `data.path`)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl CheckCommand {
    /// Resolve the seed file to check.
    #[must_use]
    pub fn data_path(&self, config: &Config) -> PathBuf {
        self.data.clone().unwrap_or_else(|| config.data.path.clone())
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
