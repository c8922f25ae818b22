//! Motion service interface
//!
//! The delta robot's kinematics and actuation live in an external service.
//! This module defines the narrow request/response contract the printer uses
//! to talk to it:
//! - `move_to_point`: a single target, answered with success flag and message
//! - `move_path`: a batch of targets, answered with a message (empty = success)

pub mod client;
pub mod simulated;

use dotmatrix_core::{MotionError, Waypoint};
use serde::{Deserialize, Serialize};

/// Response to a single-point move request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveToPointResponse {
    /// Whether the robot reached the requested point
    pub succeeded: bool,
    /// Service-provided detail, usually empty on success
    pub message: String,
}

impl MoveToPointResponse {
    /// A successful response
    pub fn ok() -> Self {
        Self {
            succeeded: true,
            message: String::new(),
        }
    }

    /// A failed response carrying the service's message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }
}

/// Response to a path request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovePathResponse {
    /// Empty on success, otherwise the failure reason
    pub message: String,
}

impl MovePathResponse {
    /// A successful response
    pub fn ok() -> Self {
        Self::default()
    }

    /// A failed response carrying the service's message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Whether the service reported success
    pub fn is_success(&self) -> bool {
        self.message.is_empty()
    }
}

/// External robot motion service
///
/// Implementations forward requests to the robot (or simulate it). Calls are
/// blocking and run to completion; an `Err` means the request never reached
/// the robot, while a response describes what the robot did with it.
pub trait MotionService: Send {
    /// Move the effector to a single point
    fn move_to_point(&mut self, motion: &Waypoint) -> Result<MoveToPointResponse, MotionError>;

    /// Execute a batch of waypoints as one continuous motion
    fn move_path(&mut self, motions: &[Waypoint]) -> Result<MovePathResponse, MotionError>;

    /// Human readable service name for logs
    fn name(&self) -> &str {
        "motion service"
    }
}
