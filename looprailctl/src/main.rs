//! `looprailctl`: replay traces, run the autoplay demo, print configuration.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use looprail_config::{ConfigLoad, ConfigLoader, FileConfig};
use looprail_core::FixedLayout;
use looprailctl::demo::{self, DemoOptions};
use looprailctl::{Trace, replay, write_records};

#[derive(Parser)]
#[command(
    name = "looprailctl",
    version,
    about = "Replay and inspect looprail carousel sessions"
)]
struct Cli {
    /// TOML configuration file (defaults to ./looprail.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// .env file seeding unset LOOPRAIL_* variables
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a recorded JSON trace on a virtual clock and print effects as JSON lines
    Replay {
        /// Path to the trace file
        trace: PathBuf,
    },
    /// Let a synthetic carousel autoplay in real time
    Demo {
        #[arg(long, default_value_t = 3)]
        slides: usize,
        #[arg(long, default_value_t = 300.0)]
        slide_width: f32,
        /// How long to run, e.g. "10s"
        #[arg(long, default_value = "10s")]
        duration: humantime::Duration,
        /// Override the autoplay interval, e.g. "1s"
        #[arg(long)]
        interval: Option<humantime::Duration>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn init_logger() {
    // stdout carries effect records
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("looprail_core", LevelFilter::Debug)
        .filter_module("looprailctl", LevelFilter::Debug)
        .init();
}

fn load_config(cli: &Cli) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new().with_env_file(&cli.env_file);
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    loader.load().context("failed to load carousel configuration")
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let load = load_config(&cli)?;
    log::debug!("Configuration sources: {:?}", load.sources);

    match cli.command {
        Command::Replay { trace } => {
            let parsed = Trace::from_path(&trace)
                .with_context(|| format!("loading trace {}", trace.display()))?;
            let records = replay(&parsed, load.config)
                .with_context(|| format!("replaying {}", trace.display()))?;
            write_records(&records, io::stdout().lock())?;
        }
        Command::Demo {
            slides,
            slide_width,
            duration,
            interval,
        } => {
            let mut config = load.config;
            if let Some(interval) = interval {
                config.autoplay_interval = interval.into();
            }
            let options = DemoOptions {
                slides,
                layout: FixedLayout::new(slide_width, slide_width),
                run_for: duration.into(),
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("failed to start timer runtime")?;
            runtime.block_on(demo::run(options, config, io::stdout()))?;
        }
        Command::Config => {
            let rendered = toml::to_string(&FileConfig::from(&load.config))
                .context("failed to render configuration")?;
            for source in &load.sources {
                println!("# source: {source:?}");
            }
            print!("{rendered}");
        }
    }
    Ok(())
}
