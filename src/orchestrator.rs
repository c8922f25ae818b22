//! Print orchestration
//!
//! Ties calibration, operator confirmation, path planning and motion
//! together. Images are handled strictly one at a time: each is confirmed,
//! checked, planned and executed before the next one is taken.

use crate::calibration::Calibrator;
use crate::input::{Decision, InputProvider};
use dotmatrix_camtools::{DotImage, DotPathPlanner, DotPrintParameters, PlanSummary};
use dotmatrix_communication::{MotionClient, MoveOutcome, PathOutcome};
use dotmatrix_core::{EventDispatcher, ImageError, MotionError, PrinterEvent, Result};
use dotmatrix_settings::PrinterSettings;
use tokio::sync::mpsc;

const CONFIRM_PROMPT: &str = "Receiving image. Start? Y/N";

/// Planner parameters derived from printer settings
pub fn planner_parameters(settings: &PrinterSettings) -> DotPrintParameters {
    DotPrintParameters {
        max_width_dots: settings.field_width_dots,
        max_height_dots: settings.field_height_dots,
        mm_per_dot: settings.mm_per_dot,
        elevation_small: settings.elevation_small,
        elevation_large: settings.elevation_large,
        movement_threshold: settings.movement_threshold,
        acceleration: settings.acceleration,
    }
}

/// What became of an image
#[derive(Debug, Clone, PartialEq)]
pub enum PrintOutcome {
    /// The path was submitted; `path` carries the service's verdict
    Printed {
        summary: PlanSummary,
        path: PathOutcome,
    },
    /// The operator declined the print
    Declined,
    /// The image does not fit the draw field
    Rejected(ImageError),
    /// No drawing surface Z has been calibrated yet
    NotCalibrated,
    /// The pen could not be brought to the start point
    Aborted(MotionError),
}

/// Drives calibration and printing
pub struct PrintOrchestrator {
    client: MotionClient,
    planner: DotPathPlanner,
    settings: PrinterSettings,
    drawing_surface_z: Option<f64>,
    events: EventDispatcher,
    input: Box<dyn InputProvider>,
}

impl PrintOrchestrator {
    /// Create an uncalibrated orchestrator
    pub fn new(
        client: MotionClient,
        settings: PrinterSettings,
        input: Box<dyn InputProvider>,
    ) -> Self {
        Self {
            client,
            planner: DotPathPlanner::new(planner_parameters(&settings)),
            settings,
            drawing_surface_z: None,
            events: EventDispatcher::default(),
            input,
        }
    }

    /// Lifecycle event dispatcher
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Motion client driving the robot
    pub fn client(&self) -> &MotionClient {
        &self.client
    }

    /// Calibrated drawing surface Z, if calibration has run
    pub fn drawing_surface_z(&self) -> Option<f64> {
        self.drawing_surface_z
    }

    /// Run the calibration procedure and park the pen at the start point
    pub fn calibrate(&mut self) -> Result<f64> {
        let z = Calibrator::new(&self.settings).run(&mut self.client, self.input.as_mut())?;

        self.drawing_surface_z = Some(z);
        self.events.publish(PrinterEvent::Calibrated {
            drawing_surface_z: z,
        });
        self.client.move_to(self.settings.start_point);

        Ok(z)
    }

    /// Ask the operator whether to print
    ///
    /// Re-prompts until the response starts with Y or N. Running out of
    /// input counts as a refusal.
    fn confirm(&mut self) -> bool {
        loop {
            let Some(response) = self.input.read_line(CONFIRM_PROMPT) else {
                tracing::warn!("Input closed while waiting for confirmation");
                return false;
            };
            match Decision::parse(&response) {
                Decision::Accept => return true,
                Decision::Decline => return false,
                _ => tracing::warn!("Expected Y or N, got '{}'", response),
            }
        }
    }

    /// Print one image
    pub fn handle_image(&mut self, image: &DotImage) -> PrintOutcome {
        let (width, height) = (image.width(), image.height());

        let Some(drawing_z) = self.drawing_surface_z else {
            tracing::warn!("Ignoring {}x{} image: printer is not calibrated", width, height);
            self.events
                .publish(PrinterEvent::PrintRejected("printer is not calibrated".to_string()));
            return PrintOutcome::NotCalibrated;
        };

        tracing::info!(
            "Received {}x{} image with {} dots",
            width,
            height,
            image.dot_count()
        );

        if !self.confirm() {
            tracing::info!("Print declined");
            self.events.publish(PrinterEvent::PrintDeclined);
            return PrintOutcome::Declined;
        }

        if let Err(e) = self.planner.check_bounds(width, height) {
            tracing::error!("{}", e);
            self.events.publish(PrinterEvent::PrintRejected(e.to_string()));
            return PrintOutcome::Rejected(e);
        }

        if let MoveOutcome::Failed(e) = self.client.move_to(self.settings.start_point) {
            tracing::error!("Aborting print, start point unreachable: {}", e);
            self.events.publish(PrinterEvent::PrintRejected(e.to_string()));
            return PrintOutcome::Aborted(e);
        }

        let plan = match self
            .planner
            .plan(image, drawing_z, self.client.effector_location())
        {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!("{}", e);
                self.events.publish(PrinterEvent::PrintRejected(e.to_string()));
                return PrintOutcome::Rejected(e);
            }
        };

        let summary = plan.summary;
        self.events.publish(PrinterEvent::PrintStarted {
            dots: summary.dots,
            waypoints: plan.path.len(),
        });

        let path = self.client.execute_path(plan.path);
        self.client.move_to(self.settings.start_point);

        self.events.publish(PrinterEvent::PrintFinished {
            dots: summary.dots,
            succeeded: path.is_success(),
            finished_at: chrono::Utc::now(),
        });

        PrintOutcome::Printed { summary, path }
    }

    /// Print images from `images` until the channel closes
    ///
    /// Returns the number of images whose path was submitted. Must not be
    /// called from within an async runtime.
    pub fn run(&mut self, mut images: mpsc::Receiver<DotImage>) -> usize {
        let mut printed = 0;
        while let Some(image) = images.blocking_recv() {
            match self.handle_image(&image) {
                PrintOutcome::Printed { path, .. } => {
                    printed += 1;
                    if let Some(e) = path.error {
                        tracing::warn!("Print finished with errors: {}", e);
                    }
                }
                PrintOutcome::Rejected(e) => tracing::warn!("Image skipped: {}", e),
                PrintOutcome::Aborted(e) => tracing::warn!("Image skipped: {}", e),
                PrintOutcome::Declined | PrintOutcome::NotCalibrated => {}
            }
        }
        tracing::info!("Image channel closed after {} prints", printed);
        printed
    }
}

impl std::fmt::Debug for PrintOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintOrchestrator")
            .field("client", &self.client)
            .field("planner", &self.planner)
            .field("drawing_surface_z", &self.drawing_surface_z)
            .finish()
    }
}
