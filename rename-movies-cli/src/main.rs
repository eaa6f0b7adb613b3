use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use rename_movies_core::{Config, OutputFormatter, VersionResult};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod confirm;
mod rename;

use cli::{Cli, Commands, OutputFormat};

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "RENAME_MOVIES_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };

    match cli.command {
        Commands::Rename {
            videos,
            model,
            dry_run,
            preview,
            output,
        } => rename::handle_rename(
            &config,
            &videos,
            model,
            dry_run,
            preview,
            output,
            cli.yes,
            use_color,
        ),

        Commands::Version { output } => handle_version(output),

        Commands::Completions { shell, out_dir } => {
            let mut cmd = Cli::command();
            match out_dir {
                Some(dir) => generate_completions(shell, &mut cmd, "rename-movies", &dir),
                None => {
                    clap_complete::generate(
                        shell,
                        &mut cmd,
                        "rename-movies",
                        &mut std::io::stdout(),
                    );
                    Ok(())
                },
            }
        },
    }
}

/// Stderr subscriber. `RENAME_MOVIES_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

/// 1 for conflicts, 2 for invalid input, 3 for everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<rename_movies_core::Error>() {
        Some(e) if e.is_conflict() => 1,
        Some(e) if e.is_invalid_input() => 2,
        _ => 3,
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "rename-movies".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
