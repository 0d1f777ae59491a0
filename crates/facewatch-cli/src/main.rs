use anyhow::{Context, Result};
use clap::Parser;
use facewatch_cli::config::Config;
use facewatch_cli::cycle::run_cycle;
use facewatch_core::{enroll, EnrollError, FrameSession, GalleryStore, SessionState};
use facewatch_hw::Camera;
use facewatch_vision::FaceAnalyzer;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "facewatch",
    about = "Live face identification with interactive enrollment"
)]
struct Cli {
    /// V4L2 camera device path
    #[arg(long)]
    device: Option<String>,

    /// Data directory (gallery file + archived face crops)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory containing the ONNX model files
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Match tolerance (Euclidean distance)
    #[arg(long)]
    tolerance: Option<f32>,

    /// List V4L2 capture devices and exit
    #[arg(long)]
    list_devices: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.list_devices {
        for dev in Camera::list_devices() {
            println!("{}  {} ({})", dev.path, dev.name, dev.driver);
        }
        return Ok(());
    }

    let mut config = Config::from_env();
    if let Some(device) = cli.device {
        config.camera_device = device;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(model_dir) = cli.model_dir {
        config.model_dir = model_dir;
    }
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }

    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let mut store = GalleryStore::open(&config.data_dir)
        .with_context(|| format!("opening gallery store in {}", config.data_dir.display()))?;

    // Camera open failure is the one fatal startup error.
    let camera = Camera::open(&config.camera_device)
        .with_context(|| format!("cannot open camera {}", config.camera_device))?;

    let mut analyzer = FaceAnalyzer::load(&config.model_dir)
        .with_context(|| format!("loading models from {}", config.model_dir.display()))?;

    let mut session = FrameSession::new();

    println!(
        "facewatch ready — {} gallery entries, tolerance {}",
        store.gallery().len(),
        config.tolerance
    );
    println!("commands: enroll <name> | quit");

    let mut interval = tokio::time::interval(Duration::from_millis(config.cycle_interval_ms));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last_status = String::new();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match run_cycle(&camera, &mut analyzer, store.gallery(), config.tolerance) {
                    Ok(outcome) => {
                        session.observe(outcome);
                        let status = status_line(session.state());
                        if status != last_status {
                            println!("{status}");
                            last_status = status;
                        }
                    }
                    Err(e) => {
                        // Transient: logged, cycle retried on the next tick.
                        tracing::warn!(error = %e, "capture cycle failed");
                    }
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(cmd)) => {
                        if !handle_command(cmd.trim(), &mut session, &mut store) {
                            break;
                        }
                    }
                    Ok(None) => break, // stdin closed
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin read failed; shutting down");
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    tracing::info!("facewatch shutting down");
    // Camera handle drops here, releasing the device before teardown.
    Ok(())
}

fn status_line(state: &SessionState) -> String {
    match state {
        SessionState::Idle => "no face detected".to_string(),
        SessionState::TrackingUnknown => {
            "unknown face — type `enroll <name>` to register".to_string()
        }
        SessionState::Recognized(name) => format!("recognized: {name}"),
    }
}

/// Handle one operator command. Returns false to shut down.
fn handle_command(cmd: &str, session: &mut FrameSession, store: &mut GalleryStore) -> bool {
    match cmd.split_once(' ') {
        Some(("enroll", name)) => {
            match enroll(session, store, name) {
                Ok(enrolled) => {
                    println!("enrolled {enrolled} ({} gallery entries)", store.gallery().len());
                }
                Err(EnrollError::InvalidName) => {
                    println!("enrollment needs a non-empty name");
                }
                Err(EnrollError::NoFaceAvailable) => {
                    println!("no unknown face on screen to enroll");
                }
                Err(EnrollError::Persistence(e)) => {
                    // Data-loss risk: make the failure loud, keep running.
                    tracing::error!(error = %e, "gallery write failed");
                    println!("ERROR: could not save the gallery ({e}); the face is still held — retry with `enroll <name>`");
                }
            }
            true
        }
        None if cmd == "enroll" => {
            println!("usage: enroll <name>");
            true
        }
        None if cmd == "quit" || cmd == "exit" => false,
        None if cmd.is_empty() => true,
        _ => {
            println!("commands: enroll <name> | quit");
            true
        }
    }
}
