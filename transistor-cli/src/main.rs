//! `transistor` command-line tool
//!
//! # Usage
//!
//! ```bash
//! # Show every flag of a set
//! transistor inspect Permission
//!
//! # Show which flags a stored value carries
//! transistor inspect flags/Permission.toml 11
//!
//! # Generate an enum, prompting for flags
//! transistor make-flags Permission
//!
//! # Generate non-interactively
//! transistor make-flags Permission --flag read --flag write --force
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use transistor_cli::generate::{self, FlagEnum};
use transistor_cli::inspect::{self, InspectTable};
use transistor_cli::{FlagSet, TransistorConfig};

#[derive(Parser, Debug)]
#[command(name = "transistor", version)]
#[command(about = "Inspect and generate bitmask flag sets", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "transistor.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the bits of each flag and, optionally, of a stored value
    Inspect {
        /// Definition path, or name looked up in the flags directory
        flag_set: String,

        /// Stored value to break down
        value: Option<String>,
    },
    /// Generate a flag enum
    MakeFlags {
        /// Enum name (PascalCase); prompted for if omitted
        name: Option<String>,

        /// Flag to add; prompts interactively when none are given
        #[arg(short, long = "flag")]
        flags: Vec<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Output directory, overriding the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {e:#}", "Error".red().bold());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = TransistorConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    match cli.command {
        Commands::Inspect { flag_set, value } => {
            cmd_inspect(&config, &flag_set, value.as_deref(), !cli.no_color)
        }
        Commands::MakeFlags {
            name,
            flags,
            force,
            output,
        } => {
            let dir = output.unwrap_or(config.output_dir);
            cmd_make_flags(name, &flags, force, &dir)
        }
    }
}

fn cmd_inspect(
    config: &TransistorConfig,
    reference: &str,
    value: Option<&str>,
    color: bool,
) -> Result<()> {
    let value = value.map(inspect::parse_value).transpose()?;
    let set = FlagSet::locate(reference, &config.flags_dir)?;

    let table = InspectTable::new(&set, value);
    print!("{}", table.render(color));
    Ok(())
}

fn cmd_make_flags(
    name: Option<String>,
    flags: &[String],
    force: bool,
    dir: &std::path::Path,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("Enum name")
            .validate_with(|input: &String| -> Result<(), String> {
                generate::validate_name(input).map_err(|e| e.to_string())
            })
            .interact_text()?,
    };

    let mut generated = FlagEnum::new(name)?;
    if flags.is_empty() {
        prompt_flags(&mut generated)?;
    } else {
        for flag in flags {
            generated.push(flag)?;
        }
    }

    let path = generated.write(dir, force)?;
    println!(
        "{} {} with {} flags",
        "Created".green().bold(),
        path.display(),
        generated.flags().len()
    );
    Ok(())
}

/// Prompts `Flag 1`, `Flag 2`, ... until an empty answer.
fn prompt_flags(generated: &mut FlagEnum) -> Result<()> {
    loop {
        let index = generated.flags().len() + 1;
        let current: &FlagEnum = generated;
        let answer = Input::<String>::new()
            .with_prompt(format!("Flag {index}"))
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() {
                    return Ok(());
                }
                current.check(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        if answer.trim().is_empty() {
            return Ok(());
        }
        generated.push(&answer)?;
    }
}
