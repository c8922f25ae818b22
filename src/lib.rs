//! # DotMatrix
//!
//! Prints monochrome images as grids of dots with a pen carried by a delta
//! robot. The pen is lowered once per dark pixel; rows are scanned in
//! alternating directions to keep travel short.
//!
//! ## Architecture
//!
//! DotMatrix is organized as a workspace with multiple crates:
//!
//! 1. **dotmatrix-core** - Geometry, waypoints, errors, lifecycle events
//! 2. **dotmatrix-communication** - Motion service trait, motion client, simulator
//! 3. **dotmatrix-camtools** - Dot images and the dot path planner
//! 4. **dotmatrix-settings** - Printer configuration files
//! 5. **dotmatrix** - Calibration, print orchestration and the binary

pub mod calibration;
pub mod input;
pub mod orchestrator;

pub use calibration::{transition, CalibrationEffect, CalibrationState, Calibrator, Transition};
pub use input::{Decision, InputProvider, ScriptedInput, StdinInput};
pub use orchestrator::{planner_parameters, PrintOrchestrator, PrintOutcome};

pub use dotmatrix_camtools::{DotImage, DotPathPlanner, DotPlan, DotPrintParameters, PlanSummary};
pub use dotmatrix_communication::{
    MotionClient, MotionLog, MotionService, MoveOutcome, MovePathResponse, MoveToPointResponse,
    PathOutcome, SimulatedMotionService,
};
pub use dotmatrix_core::{
    Error, EventDispatcher, ImageError, InputError, MotionError, MotionPath, Point3D,
    PrinterEvent, Result, Waypoint,
};
pub use dotmatrix_settings::{Config, PrinterSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout to operator prompts
/// - RUST_LOG environment variable support (defaults to `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
