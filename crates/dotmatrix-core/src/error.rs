//! Error handling for DotMatrix
//!
//! Provides error types for all layers of the printer:
//! - Motion errors (robot motion service)
//! - Image errors (validation of incoming dot images)
//! - Input errors (interactive operator input)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Motion service error type
///
/// Represents failures reported by, or while talking to, the external
/// robot motion service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The service could not be reached
    #[error("Motion service unavailable: {reason}")]
    ServiceUnavailable {
        /// Why the service could not be reached.
        reason: String,
    },

    /// The service rejected a single-point move
    #[error("Move to ({x}, {y}, {z}) rejected: {message}")]
    MoveRejected {
        /// Requested X coordinate.
        x: f64,
        /// Requested Y coordinate.
        y: f64,
        /// Requested Z coordinate.
        z: f64,
        /// The message reported by the service.
        message: String,
    },

    /// The service reported a failure while executing a path
    #[error("Path execution failed: {message}")]
    PathFailed {
        /// The message reported by the service.
        message: String,
    },
}

/// Image error type
///
/// Represents problems with an incoming dot image that prevent planning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The image does not fit the draw field
    #[error("Invalid image size: {width}x{height} dots exceeds draw field of {max_width}x{max_height} dots")]
    OutOfBounds {
        /// Image width in dots.
        width: usize,
        /// Image height in dots.
        height: usize,
        /// Draw field width in dots.
        max_width: usize,
        /// Draw field height in dots.
        max_height: usize,
    },

    /// The sample buffer does not match the stated dimensions
    #[error("Image data holds {actual} samples, expected {expected} for {width}x{height}")]
    DataLengthMismatch {
        /// Image width in dots.
        width: usize,
        /// Image height in dots.
        height: usize,
        /// Expected number of samples.
        expected: usize,
        /// Actual number of samples.
        actual: usize,
    },

    /// The stated dimensions describe more samples than can be addressed
    #[error("Image dimensions {width}x{height} are too large")]
    DimensionsOverflow {
        /// Image width in dots.
        width: usize,
        /// Image height in dots.
        height: usize,
    },
}

/// Operator input error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The input source has no more lines
    #[error("Input closed before {context} completed")]
    Closed {
        /// The procedure that was waiting for input.
        context: String,
    },
}

/// Main error type for DotMatrix
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Motion error
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// Image error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),
}

impl Error {
    /// Check if this is an image error
    pub fn is_image_error(&self) -> bool {
        matches!(self, Error::Image(_))
    }

    /// Check if this is an input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
