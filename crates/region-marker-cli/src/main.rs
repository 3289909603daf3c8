mod args;
mod outline;
mod tui;

use anyhow::{Result, bail};
use clap::Parser;
use region_marker_config::Config;
use region_marker_engine::{io, parse_regions};
use std::{path::Path, process::ExitCode};

use args::{Cli, CliArgs, Command};

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    // clap exits with status 2 on usage errors.
    let cli = Cli::parse();
    let status = match cli.into_command() {
        Ok(Command::Outline(args)) => exit_status(run(&args)),
        Ok(Command::InitConfig) => exit_status(init_config(&Config::config_path()).map(|()| true)),
        Err(e) => exit_status(Err(e)),
    };
    ExitCode::from(status)
}

/// 0 when well formed, 1 when diagnostics were reported, 2 on errors.
fn exit_status(outcome: Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    }
}

fn load_config() -> Result<Config> {
    Ok(match Config::load()? {
        Some(config) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        None => Config::default(),
    })
}

/// Parses the file and shows the result; returns whether it was well formed.
fn run(args: &CliArgs) -> Result<bool> {
    let syntax = outline::resolve_syntax(args, load_config)?;
    let rope = io::read_source(&args.file)?;
    let result = parse_regions(&rope, &syntax);
    log::info!(
        "{}: {} regions, {} diagnostics",
        args.file.display(),
        result.region_count(),
        result.diagnostics.len()
    );

    let well_formed = result.is_well_formed();
    if args.tui {
        let source = rope.slice_to_cow(..).into_owned();
        tui::run(tui::App::new(args.file.clone(), &source, result))?;
    } else {
        for line in outline::report(&args.file, &result) {
            println!("{line}");
        }
    }

    Ok(well_formed)
}

/// Writes the default language table to `config_path`, never overwriting.
fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!("Config file already exists at {}", config_path.display());
    }
    Config::default().save_to_path(config_path)?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
