//! # DotMatrix Core
//!
//! Core types and utilities for DotMatrix.
//! Provides the geometry primitives, motion waypoints, error taxonomy
//! and printer lifecycle events shared by the other crates.

pub mod core;
pub mod data;
pub mod error;
pub mod types;

pub use crate::core::event::{EventDispatcher, PrinterEvent};

pub use data::{MotionPath, Point3D, Waypoint};

pub use error::{Error, ImageError, InputError, MotionError, Result};

pub use types::{thread_safe_vec, BoxedIterator, ThreadSafeVec};
