use anyhow::Context;
use clap::Parser;
use dotmatrix::{
    init_logging, Config, DotImage, MotionClient, PrintOrchestrator, SimulatedMotionService,
    StdinInput, BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Print monochrome images as dot grids with a delta robot
#[derive(Parser, Debug)]
#[command(name = "dotmatrix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the user config directory
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Image files to print, in order
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_logging()?;
    tracing::info!("DotMatrix {} (built {})", VERSION, BUILD_DATE);

    let config = match args.config {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };
    let settings = config.printer;

    let client = MotionClient::with_location(
        Box::new(SimulatedMotionService::new()),
        settings.acceleration,
        settings.start_point,
    );
    let mut orchestrator = PrintOrchestrator::new(client, settings, Box::new(StdinInput::new()));

    if let Err(e) = orchestrator.calibrate() {
        tracing::error!("Calibration did not complete: {}", e);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(1);
    let loader = std::thread::Builder::new()
        .name("image-loader".to_string())
        .spawn(move || {
            for path in args.images {
                match DotImage::from_file(&path) {
                    Ok(image) => {
                        if tx.blocking_send(image).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::error!("{:#}", e),
                }
            }
        })?;

    let printed = orchestrator.run(rx);
    if loader.join().is_err() {
        tracing::error!("Image loader thread panicked");
    }

    tracing::info!("Printed {} images", printed);
    Ok(())
}
