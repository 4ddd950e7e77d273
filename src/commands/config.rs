use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::config::{Config, SystemEnv};

pub fn execute(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("show", sub_matches)) => show(sub_matches),
        Some(("path", _)) => path(),
        Some(("init", sub_matches)) => init(sub_matches),
        _ => {
            println!("Use 'healthmon config --help' for more information.");
            Ok(0)
        }
    }
}

/// Print the configuration after file and environment layers are applied
fn show(matches: &ArgMatches) -> Result<i32> {
    let config_path = matches.get_one::<std::path::PathBuf>("config");
    let mut config = Config::load(config_path.map(|p| p.as_path()))?;
    config.apply_env(&SystemEnv)?;
    config.validate()?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(0)
}

fn path() -> Result<i32> {
    let path = Config::get_config_path().context("Could not determine config directory")?;
    println!("{}", path.display());
    Ok(0)
}

fn init(matches: &ArgMatches) -> Result<i32> {
    let path = match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => path.clone(),
        None => Config::get_config_path().context("Could not determine config directory")?,
    };

    if path.exists() && !matches.get_flag("force") {
        println!(
            "{}",
            format!("Config file already exists: {}", path.display()).yellow()
        );
        println!("{}", "Use --force to overwrite it.".dimmed());
        return Ok(1);
    }

    Config::default()
        .save_to(&path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!(
        "{} {}",
        "✓ Default configuration written to".green(),
        path.display().to_string().cyan()
    );
    Ok(0)
}
