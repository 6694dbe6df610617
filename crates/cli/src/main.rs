use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::Receiver;

use facewatch_core::capture::domain::detector_settings::DetectorSettings;
use facewatch_core::capture::infrastructure::replay_camera::{ReplayCamera, ReplayPermission};
use facewatch_core::forwarding::domain::result_forwarder::{
    ForwardOutcome, NullResultForwarder, ResultForwarder,
};
use facewatch_core::forwarding::infrastructure::http_batch_transport::HttpBatchTransport;
use facewatch_core::forwarding::infrastructure::threaded_result_forwarder::ThreadedResultForwarder;
use facewatch_core::shared::config::ViewerConfig;
use facewatch_core::shared::session_logger::StdoutSessionLogger;
use facewatch_core::viewer::face_viewer::{FaceViewer, ViewerScreen};
use facewatch_core::viewer::permission_gate::AuthorizationState;

/// How long to wait for in-flight forwards when the session ends.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Forwarder plus the channel its outcomes arrive on, if any.
type ForwarderParts = (Box<dyn ResultForwarder>, Option<Receiver<ForwardOutcome>>);

/// Headless face viewer: replays recorded detection events through the
/// detection toggle, overlay and result forwarder.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    /// Recorded detection events (JSON Lines, one `{"faces":[...]}` per line).
    events: PathBuf,

    /// Remote server base URL; batches go to `<URL>/process_faces`.
    #[arg(long)]
    server_url: Option<String>,

    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not forward detection batches.
    #[arg(long)]
    no_forward: bool,

    /// Answer the camera permission prompt with a denial.
    #[arg(long)]
    deny_permission: bool,

    /// Stop detection after this many events.
    #[arg(long)]
    stop_after: Option<usize>,

    /// Minimum interval between replayed detections, in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = resolve_config(&cli)?;
    let settings = DetectorSettings::default().with_min_interval(config.min_detection_interval());
    let permission = if cli.deny_permission {
        ReplayPermission::Deny
    } else {
        ReplayPermission::Grant
    };

    let camera = ReplayCamera::load(&cli.events, &settings, permission)?;
    let events = camera.events();

    let (forwarder, outcomes) = build_forwarder(&config)?;
    let mut viewer = FaceViewer::new(
        Box::new(camera),
        forwarder,
        Box::new(StdoutSessionLogger::new()),
    );
    if let Some(outcomes) = outcomes {
        viewer = viewer.with_outcomes(outcomes);
    }

    if viewer.mount() != AuthorizationState::Granted {
        report_screen(&viewer.view());
        return Ok(());
    }

    let state = viewer.toggle()?;
    log::info!("Detection {state}");

    let limit = cli.stop_after.unwrap_or(usize::MAX);
    for (handled, batch) in events.iter().enumerate() {
        if handled >= limit {
            break;
        }
        viewer.on_faces_detected(batch);
        report_screen(&viewer.view());
    }

    let state = viewer.toggle()?;
    log::info!("Detection {state}");
    viewer.unmount(SHUTDOWN_GRACE);
    Ok(())
}

fn build_forwarder(config: &ViewerConfig) -> Result<ForwarderParts, Box<dyn std::error::Error>> {
    if !config.forward_results {
        log::info!("Result forwarding disabled");
        return Ok((Box::new(NullResultForwarder), None));
    }
    let transport = Arc::new(HttpBatchTransport::new(config.endpoint()?));
    log::info!("Forwarding detection batches to {}", transport.endpoint());
    let (tx, rx) = crossbeam_channel::unbounded();
    let forwarder = ThreadedResultForwarder::new(transport).with_outcomes(tx);
    Ok((Box::new(forwarder), Some(rx)))
}

fn resolve_config(cli: &Cli) -> Result<ViewerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load_from(path)?,
        None => ViewerConfig::load(),
    };
    if let Some(url) = &cli.server_url {
        config.server_base_url = url.clone();
    }
    if cli.no_forward {
        config.forward_results = false;
    }
    if let Some(ms) = cli.interval_ms {
        config.min_detection_interval_ms = ms;
    }
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.events.exists() {
        return Err(format!("Event file not found: {}", cli.events.display()).into());
    }
    if cli.stop_after == Some(0) {
        return Err("--stop-after must be at least 1".into());
    }
    if let Some(path) = &cli.config {
        ensure_file(path)?;
    }
    Ok(())
}

fn ensure_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("Config file not found: {}", path.display()).into());
    }
    Ok(())
}

fn report_screen(screen: &ViewerScreen) {
    match screen {
        ViewerScreen::Pending => {}
        ViewerScreen::NoAccess { message } => log::warn!("{message}"),
        ViewerScreen::Live {
            overlay: Some(overlay),
            ..
        } => {
            for b in &overlay.boxes {
                log::debug!(
                    "  box {}: ({:.0}, {:.0}) {:.0}x{:.0}",
                    b.key,
                    b.left,
                    b.top,
                    b.width,
                    b.height
                );
            }
        }
        ViewerScreen::Live { overlay: None, .. } => {}
    }
}
