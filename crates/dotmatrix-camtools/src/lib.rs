//! # DotMatrix CAM Tools
//!
//! Turns thresholded monochrome images into pen motion for the delta robot.
//!
//! - **Dot Image**: validated row-major grid of samples, `0` meaning "dot"
//! - **Dot Printer**: boustrophedon scan that emits lift/travel/press
//!   waypoints for every dot, lifting higher for long jumps

pub mod dot_image;
pub mod dot_printer;

pub use dot_image::DotImage;
pub use dot_printer::{DotPathPlanner, DotPlan, DotPrintParameters, PlanSummary};
