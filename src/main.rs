//! Live Mosaic CLI
//!
//! Runs the mosaic pipeline against the mock pixel source and reports how
//! many cells each frame had to redraw.

use clap::Parser;
use live_mosaic::{
    capture::{Camera, FileConfig, MockCamera},
    color::Rgb,
    metrics::{MetricsRegistry, MetricsSnapshot},
    render::{CanvasSurface, FramePipeline},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Command-line options. Flags override values from the config file.
#[derive(Debug, Parser)]
#[command(name = "live-mosaic", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to process (ignored with --continuous)
    #[arg(short, long)]
    frames: Option<u32>,

    /// Run until interrupted
    #[arg(long)]
    continuous: bool,

    /// Binning mode: average or sample
    #[arg(long)]
    binning: Option<String>,

    /// Color mode: identity, reduceBitDepth or matchPalette
    #[arg(long)]
    color_mode: Option<String>,

    /// Active palette name
    #[arg(long)]
    palette: Option<String>,

    /// Per-channel noise added by the mock source
    #[arg(long, default_value_t = 0)]
    noise: u8,

    /// Seed for the mock source noise
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Live Mosaic v{}", live_mosaic::VERSION);
    info!("This is a demonstration using mock camera input");

    let mut config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(binning) = cli.binning {
        config.mosaic.binning = binning;
    }
    if let Some(color_mode) = cli.color_mode {
        config.mosaic.color_mode = color_mode;
    }
    if let Some(palette) = cli.palette {
        config.mosaic.palette = palette;
    }
    if let Some(frames) = cli.frames {
        config.output.frame_count = frames;
    }
    config.output.continuous |= cli.continuous;

    let mut pipeline = match FramePipeline::new(&config.mosaic) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid mosaic configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut camera = MockCamera::with_seed(cli.seed).with_noise(cli.noise);
    if let Err(e) = camera.open(&config.capture) {
        eprintln!("Failed to open camera: {}", e);
        std::process::exit(1);
    }

    let registry = match MetricsRegistry::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to create metrics registry: {}", e);
            std::process::exit(1);
        }
    };
    let publish = start_metrics(registry, config.output.metrics_port);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst)) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut canvas = CanvasSurface::new(config.capture.width, config.capture.height, Rgb::new(25, 25, 25));
    let frame_interval = Duration::from_secs_f64(1.0 / config.capture.fps as f64);

    info!(
        continuous = config.output.continuous,
        frames = config.output.frame_count,
        "Processing frames..."
    );

    let mut processed = 0u32;
    while running.load(Ordering::SeqCst)
        && (config.output.continuous || processed < config.output.frame_count)
    {
        let started = Instant::now();

        match pipeline.tick(&mut camera, &mut canvas) {
            Ok(stats) => {
                info!(
                    "Frame {}: redrew {} of {} cells",
                    stats.sequence, stats.emitted, stats.cells
                );
                publish(&MetricsSnapshot::from_pipeline(pipeline.totals(), &stats));
            }
            Err(e) => warn!("Frame failed: {}", e),
        }
        processed += 1;

        if config.output.continuous {
            if let Some(rest) = frame_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    camera.close();

    let totals = pipeline.totals();
    let drawn = totals.cells_emitted + totals.cells_suppressed;
    println!(
        "Frames: {}  cells redrawn: {}  suppressed: {} ({:.1}%)  memory resets: {}",
        totals.frames,
        totals.cells_emitted,
        totals.cells_suppressed,
        if drawn == 0 {
            0.0
        } else {
            totals.cells_suppressed as f64 * 100.0 / drawn as f64
        },
        totals.memory_resets
    );
}

/// Starts the metrics exporter if enabled and returns the update hook.
#[cfg(feature = "metrics")]
fn start_metrics(registry: MetricsRegistry, port: u16) -> Box<dyn Fn(&MetricsSnapshot)> {
    use live_mosaic::metrics::{MetricsServer, MetricsServerConfig};

    if port == 0 {
        return Box::new(move |snapshot: &MetricsSnapshot| registry.update(snapshot));
    }

    let server = MetricsServer::new(MetricsServerConfig::with_port(port), registry);
    let state = server.state();

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                warn!("Failed to start metrics runtime: {}", e);
                return;
            }
        };
        if let Err(e) = runtime.block_on(server.run()) {
            warn!("Metrics server stopped: {}", e);
        }
    });

    Box::new(move |snapshot: &MetricsSnapshot| state.blocking_write().update(snapshot))
}

#[cfg(not(feature = "metrics"))]
fn start_metrics(registry: MetricsRegistry, _port: u16) -> Box<dyn Fn(&MetricsSnapshot)> {
    Box::new(move |snapshot: &MetricsSnapshot| registry.update(snapshot))
}
