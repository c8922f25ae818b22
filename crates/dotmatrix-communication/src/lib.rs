//! # DotMatrix Communication
//!
//! Client side of the external robot motion service.
//! Sends single-point moves and batched paths, and tracks the committed
//! effector position. Includes a simulated service for running without
//! a robot attached.

pub mod motion;

pub use motion::{
    client::{MotionClient, MoveOutcome, PathOutcome},
    simulated::{MotionLog, SimulatedMotionService},
    MotionService, MovePathResponse, MoveToPointResponse,
};
