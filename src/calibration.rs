//! Drawing surface calibration
//!
//! The operator picks a candidate Z for the drawing surface, watches the pen
//! tap the center of the draw field, then its four corners, and accepts or
//! retries at each step. The procedure is an explicit [`CalibrationState`]
//! advanced by the pure [`transition`] function; [`Calibrator`] performs the
//! resulting probe motions and owns the prompt loop.

use crate::input::{Decision, InputProvider};
use dotmatrix_communication::MotionClient;
use dotmatrix_core::{InputError, Point3D, Result};
use dotmatrix_settings::PrinterSettings;

const PICK_PROMPT: &str = "Calibrating pencil Z-axis. Enter desired coordinate:";
const TEST_PROMPT: &str =
    "Enter R to repeat current, Y to accept, or anything else to try a new coordinate:";

/// Calibration procedure state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    /// Waiting for a candidate Z
    PickCoordinate,
    /// Center probed at `candidate_z`, waiting for a verdict
    TestCenter { candidate_z: f64 },
    /// Corners probed at `candidate_z`, waiting for a verdict
    TestCorners { candidate_z: f64 },
}

impl CalibrationState {
    /// Prompt shown to the operator in this state
    pub fn prompt(&self) -> &'static str {
        match self {
            CalibrationState::PickCoordinate => PICK_PROMPT,
            CalibrationState::TestCenter { .. } | CalibrationState::TestCorners { .. } => {
                TEST_PROMPT
            }
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationEffect {
    /// Nothing to do
    None,
    /// The response was not a coordinate
    Rejected(String),
    /// Tap the center of the field at the given Z
    ProbeCenter(f64),
    /// Tap the four corners of the field at the given Z
    ProbeCorners(f64),
    /// Calibration accepted with the given drawing surface Z
    Complete(f64),
}

/// Outcome of feeding one response to the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Next state; `None` once calibration is complete
    pub next: Option<CalibrationState>,
    /// Action to perform before prompting again
    pub effect: CalibrationEffect,
}

impl Transition {
    fn to(next: CalibrationState, effect: CalibrationEffect) -> Self {
        Self {
            next: Some(next),
            effect,
        }
    }
}

/// Advance the calibration procedure by one operator response
pub fn transition(state: CalibrationState, response: &str) -> Transition {
    use CalibrationState::*;

    match state {
        PickCoordinate => match response.trim().parse::<f64>() {
            Ok(z) if z.is_finite() => Transition::to(
                TestCenter { candidate_z: z },
                CalibrationEffect::ProbeCenter(z),
            ),
            _ => Transition::to(
                PickCoordinate,
                CalibrationEffect::Rejected(response.to_string()),
            ),
        },
        TestCenter { candidate_z } => match Decision::parse(response) {
            Decision::Accept => Transition::to(
                TestCorners { candidate_z },
                CalibrationEffect::ProbeCorners(candidate_z),
            ),
            Decision::Repeat => Transition::to(
                TestCenter { candidate_z },
                CalibrationEffect::ProbeCenter(candidate_z),
            ),
            _ => Transition::to(PickCoordinate, CalibrationEffect::None),
        },
        TestCorners { candidate_z } => match Decision::parse(response) {
            Decision::Accept => Transition {
                next: None,
                effect: CalibrationEffect::Complete(candidate_z),
            },
            Decision::Repeat => Transition::to(
                TestCorners { candidate_z },
                CalibrationEffect::ProbeCorners(candidate_z),
            ),
            _ => Transition::to(PickCoordinate, CalibrationEffect::None),
        },
    }
}

/// Runs the calibration procedure against a motion client
#[derive(Debug, Clone)]
pub struct Calibrator {
    start_point: Point3D,
    half_width: f64,
    half_height: f64,
    elevation: f64,
    acceleration: f64,
}

impl Calibrator {
    /// Create a calibrator for the draw field described by `settings`
    pub fn new(settings: &PrinterSettings) -> Self {
        Self {
            start_point: settings.start_point,
            half_width: settings.field_width_mm / 2.0,
            half_height: settings.field_height_mm / 2.0,
            elevation: settings.elevation_large,
            acceleration: settings.calibration_acceleration,
        }
    }

    /// Corner probe positions: lower left, upper right, lower right, upper left
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (w, h) = (self.half_width, self.half_height);
        [(-w, -h), (w, h), (w, -h), (-w, h)]
    }

    /// Lift above (`x`, `y`), touch down at `z`, and lift again
    pub fn probe(&self, client: &mut MotionClient, x: f64, y: f64, z: f64) {
        let lifted = z + self.elevation;
        client.move_to_point(x, y, lifted, self.acceleration);
        client.move_to_point(x, y, z, self.acceleration);
        client.move_to_point(x, y, lifted, self.acceleration);
    }

    /// Perform the motion requested by a transition
    pub fn perform(&self, client: &mut MotionClient, effect: &CalibrationEffect) {
        match effect {
            CalibrationEffect::ProbeCenter(z) => {
                tracing::info!("Testing center: {}", z);
                self.probe(client, 0.0, 0.0, *z);
            }
            CalibrationEffect::ProbeCorners(z) => {
                tracing::info!("Testing corners: {}", z);
                for (x, y) in self.corners() {
                    self.probe(client, x, y, *z);
                }
            }
            CalibrationEffect::Rejected(response) => {
                tracing::warn!("'{}' is not a coordinate", response);
            }
            CalibrationEffect::None | CalibrationEffect::Complete(_) => {}
        }
    }

    /// Run the procedure until the operator accepts a drawing surface Z
    ///
    /// Fails with [`InputError::Closed`] if the input runs out first.
    pub fn run(&self, client: &mut MotionClient, input: &mut dyn InputProvider) -> Result<f64> {
        client.move_to(self.start_point);

        let mut state = CalibrationState::PickCoordinate;
        loop {
            let response = input.read_line(state.prompt()).ok_or_else(|| InputError::Closed {
                context: "calibration".to_string(),
            })?;

            let Transition { next, effect } = transition(state, &response);
            if let CalibrationEffect::Complete(z) = effect {
                tracing::info!("Drawing surface calibrated at Z {}", z);
                return Ok(z);
            }

            self.perform(client, &effect);
            if let Some(next) = next {
                state = next;
            }
        }
    }
}
