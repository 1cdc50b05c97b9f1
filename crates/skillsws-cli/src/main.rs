mod commands;
mod term;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use skillsws_config::{SkillsWsConfig, home_dir, resolve_catalog_dir};
use skillsws_skills::{InstallPipeline, TargetResolver, resolve_names};

use crate::term::Palette;

#[derive(Debug, Parser)]
#[command(name = "skills-ws", version, about = "Install agent skills into your project")]
struct Cli {
    /// Skill catalog directory (overrides config and SKILLS_WS_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Install into this directory instead of probing the known locations
    #[arg(long, global = true)]
    target: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Skip the banner and progress animation
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// List all skills in the catalog
    #[command(alias = "ls")]
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Install skills by name, `all` for everything, or pick interactively
    #[command(alias = "add")]
    Install {
        /// Skill names to install
        names: Vec<String>,
    },
}

fn main() {
    // Logs go to stderr so they never mix with the report on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run_with_interrupt(cli);
    if let Err(e) = &result {
        term::restore_cursor();
        eprintln!("error: {e:#}");
    }
    std::process::exit(exit_code(&result));
}

/// Process status for a finished run: 0 on success, 1 on any failure.
fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Run the command on a blocking thread while watching for Ctrl-C.
fn run_with_interrupt(cli: Cli) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        tokio::select! {
            joined = tokio::task::spawn_blocking(move || run(cli)) => {
                joined.context("Install task panicked")?
            }
            _ = tokio::signal::ctrl_c() => {
                term::restore_cursor();
                std::process::exit(0);
            }
        }
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = skillsws_config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        SkillsWsConfig::default()
    });

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let exe = std::env::current_exe().ok();
    let catalog_dir = resolve_catalog_dir(&config, cli.catalog.as_deref(), exe.as_deref(), &cwd);

    let resolver = match cli.target.clone().or_else(|| config.target.clone()) {
        Some(path) => TargetResolver::explicit(path),
        None => TargetResolver::with_defaults(&cwd, &home_dir()),
    };

    let pipeline = InstallPipeline::load(&catalog_dir, resolver)?;
    tracing::debug!(
        catalog = %catalog_dir.display(),
        skills = pipeline.catalog().len(),
        "Catalog loaded"
    );

    let is_tty = io::stdout().is_terminal();
    let color = !cli.no_color && config.color.unwrap_or(is_tty);
    let palette = Palette::new(color, is_tty && !cli.quiet);

    let mut out = io::stdout();
    let json_list = matches!(cli.command, Some(Commands::List { json: true }));
    if config.banner && !cli.quiet && !json_list {
        term::print_banner(&mut out, &palette)?;
    }

    match cli.command {
        Some(Commands::List { json: true }) => {
            commands::print_json(&mut out, pipeline.catalog())?;
        }
        Some(Commands::List { json: false }) => {
            commands::print_list(&mut out, &palette, pipeline.catalog())?;
        }
        Some(Commands::Install { names }) if !names.is_empty() => {
            let selection = resolve_names(&names, pipeline.catalog());
            commands::run_install(&mut out, &palette, &pipeline, &selection)?;
        }
        Some(Commands::Install { .. }) | None => {
            let mut input = io::stdin().lock();
            let selection =
                commands::gather_selection(&mut input, &mut out, &palette, pipeline.catalog())?;
            commands::run_install(&mut out, &palette, &pipeline, &selection)?;
        }
    }

    Ok(())
}
