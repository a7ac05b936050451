//! Neo Sim
//!
//! Runs one simulated piece of building equipment.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use neo_sim::SimConfig;
use neo_sim::points::LogRegistrar;
use neo_sim::runtime::{DeviceRuntime, TracingSink};

/// Neo Building Equipment Simulator
#[derive(Parser, Debug)]
#[command(name = "neo-sim")]
#[command(about = "Simulated building equipment for Neo", long_about = None)]
struct Args {
    /// Equipment type: ahu, vav0-5, chiller, meter
    #[arg(short, long)]
    equipment: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between ticks
    #[arg(long)]
    interval: Option<f64>,

    /// Seed for the noise source
    #[arg(long)]
    seed: Option<u64>,

    /// Disable noise
    #[arg(long)]
    no_noise: bool,

    /// Print the device's points as JSON and exit
    #[arg(long)]
    list_points: bool,
}

impl Args {
    fn into_config(self) -> neo_sim::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::default(),
        }
        .with_env()?;

        if let Some(equipment) = self.equipment {
            config.equipment = Some(equipment);
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_noise {
            config.noise = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("neo_sim=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let list_points = args.list_points;

    let runtime = match args.into_config().and_then(|config| {
        info!(
            "Starting Neo sim v{} ({} s interval)",
            env!("CARGO_PKG_VERSION"),
            config.interval_secs
        );
        DeviceRuntime::new(&config, Arc::new(TracingSink))
    }) {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to initialize device: {}", e);
            std::process::exit(1);
        }
    };

    if list_points {
        println!("{}", serde_json::to_string_pretty(runtime.points().points())?);
        return Ok(());
    }

    let mut registrar = LogRegistrar::new();
    runtime.register_points(&mut registrar)?;
    info!(
        "Initialized {} with {} points",
        runtime.equipment(),
        registrar.registered()
    );

    let (handle, join) = runtime.spawn();

    shutdown_signal().await;
    // Already stopped if the loop exited on its own
    let _ = handle.shutdown().await;
    join.await?;

    info!("Simulator shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down...");
        },
    }
}
