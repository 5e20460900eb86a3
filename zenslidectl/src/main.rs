//! `zenslidectl`: resolve ZenSlide options and run a headless carousel.

mod script;
mod stage;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zenslide_config::{ConfigLoad, ConfigLoader, ConfigWarnings};
use zenslide_core::{Carousel, CarouselEvent, ImageFetcher};

use crate::script::Action;
use crate::stage::{LoggingStage, SimulatedFetcher, image_url};

#[derive(Parser, Debug)]
#[command(name = "zenslidectl", version)]
#[command(about = "Resolve ZenSlide carousel options and drive a headless carousel")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved option snapshot as JSON
    Resolve {
        /// Overrides document (.json or .toml)
        #[arg(long, short)]
        options: Option<PathBuf>,
    },
    /// Mount a carousel on a logging stage and run a script against it
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Overrides document (.json or .toml)
    #[arg(long, short)]
    options: Option<PathBuf>,

    /// Number of slides on the stage
    #[arg(long, default_value_t = 5)]
    slides: usize,

    /// Base URL the slide images are served from
    #[arg(long, default_value = "https://images.zenslide.test")]
    base_url: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Fetch images over HTTP instead of simulating them
    #[arg(long)]
    http: bool,

    /// Simulated image latency in milliseconds
    #[arg(long, default_value_t = 150)]
    latency_ms: u64,

    /// Slide indices whose simulated images always fail
    #[arg(long, value_delimiter = ',')]
    fail: Vec<usize>,

    /// Comma-separated actions: next, prev, goto:N, pause, resume, hover,
    /// leave, key:left|right|home|end, swipe:PX, wait:MS
    #[arg(long, value_delimiter = ',')]
    script: Vec<Action>,

    /// How long to keep running after the script, in milliseconds
    #[arg(long, default_value_t = 12_000)]
    run_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zenslide=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Resolve { options } => resolve(options),
        Command::Simulate(args) => simulate(args).await,
    }
}

fn load_options(path: Option<PathBuf>) -> Result<ConfigLoad> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let load = loader.load().context("resolving carousel options")?;
    log_warnings(&load.warnings);
    Ok(load)
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => tracing::warn!(target: "zenslidectl", hint = %hint, "{}", warning.message),
            None => tracing::warn!(target: "zenslidectl", "{}", warning.message),
        }
    }
}

fn resolve(options: Option<PathBuf>) -> Result<()> {
    let ConfigLoad { config, .. } = load_options(options)?;
    let json = serde_json::to_string_pretty(&config).context("serializing options")?;
    println!("{json}");
    Ok(())
}

async fn simulate(args: SimulateArgs) -> Result<()> {
    let ConfigLoad { config, .. } = load_options(args.options)?;

    let fetcher: Arc<dyn ImageFetcher> = if args.http {
        Arc::new(zenslide_core::HttpFetcher::new().context("building HTTP client")?)
    } else {
        let failing = args
            .fail
            .iter()
            .map(|index| image_url(&args.base_url, *index));
        Arc::new(SimulatedFetcher::new(
            Duration::from_millis(args.latency_ms),
            failing,
        ))
    };

    let stage = LoggingStage::new(args.slides, args.base_url.clone(), args.width);
    let carousel = Carousel::mount(config, stage, fetcher).context("mounting carousel")?;

    let mut events = carousel.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    println!("{}", describe(&event));
                    if event == CarouselEvent::Destroyed {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(target: "zenslidectl", skipped, "event output fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    for action in args.script {
        script::perform(&carousel, action).await;
    }
    tokio::time::sleep(Duration::from_millis(args.run_ms)).await;

    carousel.destroy();
    printer.await.context("event printer panicked")?;
    Ok(())
}

fn describe(event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::SlideChanged { from, to } => format!("slide {from} -> {to}"),
        CarouselEvent::TransitionFinished { index } => format!("showing {index}"),
        CarouselEvent::SlideLoaded { index } => format!("loaded {index}"),
        CarouselEvent::SlideUnavailable { index, reason } => {
            format!("unavailable {index}: {reason}")
        }
        CarouselEvent::Paused => "paused".to_string(),
        CarouselEvent::Resumed => "resumed".to_string(),
        CarouselEvent::Destroyed => "destroyed".to_string(),
    }
}
