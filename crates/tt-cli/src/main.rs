use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tt_core::{ClockTime, DisplayMode};
use tt_runner::{local_now, Config, ResolveMode, Runner, ShowRequest};

#[derive(Parser)]
#[command(name = "tt", version, about = "Today's lessons, with an offline fallback")]
struct Cli {
    /// Config file (default: ~/.config/tt/tt.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch (or fall back to the cached) timetable and print what is left of today
    Show {
        /// small | medium | large (default from config)
        #[arg(long)]
        mode: Option<DisplayMode>,

        /// Pretend the time is HH:MM
        #[arg(long)]
        now: Option<ClockTime>,

        /// Weekday index, Monday = 0
        #[arg(long)]
        weekday: Option<usize>,

        /// Do not touch the network, use the cached timetable only
        #[arg(long)]
        offline: bool,
    },

    /// Write a default config file
    Init,

    /// Print the cached timetable as JSON
    Cache,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    debug!("config path {}", config_path.display());

    match cli.cmd {
        Command::Show {
            mode,
            now,
            weekday,
            offline,
        } => {
            let runner = Runner::open(&config_path)?;
            let (clock, day) = local_now()?;
            let day_index = weekday.unwrap_or(day);
            if day_index > 6 {
                bail!("weekday must be 0..=6, got {day_index}");
            }
            let req = ShowRequest {
                now: now.unwrap_or(clock),
                day_index,
                mode: mode.unwrap_or(runner.cfg.display.mode),
                resolve: if offline { ResolveMode::CacheOnly } else { ResolveMode::Online },
            };
            let shown = runner.show(req).await;
            print!("{}", shown.text);
        }
        Command::Init => {
            if Runner::init(&config_path)? {
                println!("Wrote default config to {}", config_path.display());
            } else {
                println!("Config already exists at {}", config_path.display());
            }
        }
        Command::Cache => {
            let runner = Runner::open(&config_path)?;
            match runner.cached() {
                Some(day) => println!("{}", serde_json::to_string_pretty(&day)?),
                None => println!("No cached timetable"),
            }
        }
        Command::Config => {
            let cfg = Config::load_from(&config_path)
                .with_context(|| format!("no usable config; run `tt init` first ({})", config_path.display()))?;
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}
