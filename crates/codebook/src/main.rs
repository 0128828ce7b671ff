//! `codebookd` - HTTP server for the codebook catalog
//!
//! Loads the seed file, then serves the REST API until interrupted.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use std::path::Path;

use clap::Parser;
use tracing::error;

use codebook::cli::{CheckCommand, Cli, Command, ConfigCommand, ServeCommand};
use codebook::config::{load_env_file, ENV_FILE_NAME};
use codebook::{init_logging, server, Config, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());
    load_env_file(Path::new(ENV_FILE_NAME));

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, &serve_cmd),
        Command::Check(check_cmd) => handle_check(&config, &check_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_serve(config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    let config = cmd.apply(config);
    config.validate()?;

    // No seed data, no server.
    let store = match Store::load(&config.data.path) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to load seed data");
            return Err(e.into());
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server::run(&config, store))?;
    Ok(())
}

fn handle_check(config: &Config, cmd: &CheckCommand) -> anyhow::Result<()> {
    let path = cmd.data_path(config);
    let store = Store::load(&path)?;
    let stats = store.stats();

    if cmd.json {
        let report = serde_json::json!({
            "path": path,
            "records": stats.records,
            "model_references": stats.model_references,
            "tech_references": stats.tech_references,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Seed file:         {}", path.display());
        println!("Records:           {}", stats.records);
        println!("Model references:  {}", stats.model_references);
        println!("Tech references:   {}", stats.tech_references);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Address:            {}", config.server.address);
                println!("  Listen on:          {}", config.listen_address());
                println!();
                println!("[Data]");
                println!("  Seed file:          {}", config.data.path.display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
