//! UVM testbench generator binary
//!
//! Reads a `DUT_NAME` / `NUM_INTF` / `INTF` CSV description and writes a tree
//! of UVM SystemVerilog stubs, plus a `SIM/README.txt` summary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use uvm_tbgen::clean;
use uvm_tbgen::utils::{Console, SimpleConsole};
use uvm_tbgen::{CountPolicy, Generator, GeneratorConfig};

#[derive(Parser)]
#[command(name = "uvm-tbgen")]
#[command(about = "UVM testbench generator - Emits agent, env, test and top stubs from a CSV interface list")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON settings file; command-line flags take precedence
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Input CSV (default: UVM_TB_PARAMS.csv)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output root (default: verif)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Run log written during generation (default: uvm_tbgen.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Omit the timestamp banner from generated files
    #[arg(long, global = true)]
    no_banner: bool,

    /// Warn instead of failing when NUM_INTF disagrees with the INTF rows
    #[arg(long, global = true)]
    allow_count_mismatch: bool,

    /// Disable coloured console output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Generate the testbench tree (default)
    Generate,
    /// Print the planned directories and files without writing anything
    Plan,
    /// Remove the run log
    Clean,
    /// Remove the run log and the generated output tree
    CleanAll,
}

fn main() {
    let args = Args::parse();
    let console = SimpleConsole::new(!args.no_color);

    if let Err(e) = run(&args, &console) {
        console.print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args, console: &dyn Console) -> Result<()> {
    let config = build_config(args)?;
    let command = args.command.unwrap_or(Command::Generate);

    let log_file = matches!(command, Command::Generate).then_some(config.log_file.as_path());
    init_logging(args, log_file)?;

    match command {
        Command::Generate => generate(config, console),
        Command::Plan => plan(config, console),
        Command::Clean => {
            let removed = clean::clean(&config)?;
            report_removed(&removed, console);
            Ok(())
        }
        Command::CleanAll => {
            let removed = clean::clean_all(&config)?;
            report_removed(&removed, console);
            Ok(())
        }
    }
}

fn build_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.settings {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(path) = &args.config {
        config.config_file = path.clone();
    }
    if let Some(path) = &args.output {
        config.output_dir = path.clone();
    }
    if let Some(path) = &args.log_file {
        config.log_file = path.clone();
    }
    if args.no_banner {
        config.banner = false;
    }
    if args.allow_count_mismatch {
        config.count_policy = CountPolicy::Warn;
    }

    Ok(config)
}

fn init_logging(args: &Args, log_file: Option<&Path>) -> Result<()> {
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::from_level(log_level));

    // The run log always keeps INFO so every generated path is on record
    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Failed to create log file: {}", path.display()))?;
            let file_level = if args.debug {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            };
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(LevelFilter::from_level(file_level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!(">> uvm-tbgen {} started at {} <<", env!("CARGO_PKG_VERSION"), chrono::Local::now());
    Ok(())
}

fn generate(config: GeneratorConfig, console: &dyn Console) -> Result<()> {
    let generator = Generator::new(config);
    let env = generator.load()?;
    let report = generator.generate(&env)?;

    console.print_success(&format!(
        "Generated {} files for DUT '{}' under {}",
        report.records.len(),
        env.design.name,
        report.output_dir.display()
    ));
    for record in &report.records {
        console.print_path(&record.relative_path, &record.description);
    }
    for dir in &report.placeholders {
        console.print_path(&format!("{}/", dir), "placeholder, left empty");
    }
    console.print_info(&format!(
        "Refer to {} for a summary and the remaining TODOs",
        report.summary_path.display()
    ));
    Ok(())
}

fn plan(config: GeneratorConfig, console: &dyn Console) -> Result<()> {
    let output_dir = config.output_dir.clone();
    let (env, layout) = Generator::new(config).plan()?;

    console.print_info(&format!(
        "Plan for DUT '{}' ({} interface(s)) under {}",
        env.design.name,
        env.interfaces.len(),
        output_dir.display()
    ));
    for dir in &layout.directories {
        console.print_path(&format!("{}/", dir), "");
    }
    for file in &layout.files {
        console.print_path(&file.relative_path, &file.description);
    }
    console.print_path(&layout.summary, "generation summary");
    Ok(())
}

fn report_removed(removed: &[PathBuf], console: &dyn Console) {
    if removed.is_empty() {
        console.print_info("Nothing to remove");
    }
    for path in removed {
        console.print_success(&format!("Removed {}", path.display()));
    }
}
