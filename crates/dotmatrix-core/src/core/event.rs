//! Event system for printer lifecycle notifications
//!
//! Provides:
//! - Event types for calibration and print jobs
//! - Event dispatcher for publishing events to subscribers

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

/// Printer lifecycle event types
#[derive(Debug, Clone, PartialEq)]
pub enum PrinterEvent {
    /// Calibration completed with the committed drawing-surface Z
    Calibrated {
        /// The committed drawing-surface height.
        drawing_surface_z: f64,
    },
    /// A print job was accepted and planned
    PrintStarted {
        /// Number of dots in the image.
        dots: usize,
        /// Number of waypoints submitted.
        waypoints: usize,
    },
    /// A print job finished executing
    PrintFinished {
        /// Number of dots printed.
        dots: usize,
        /// Whether the motion service reported success.
        succeeded: bool,
        /// When the job finished.
        finished_at: DateTime<Utc>,
    },
    /// The operator declined a print
    PrintDeclined,
    /// A print was refused before any motion
    PrintRejected(String),
}

impl std::fmt::Display for PrinterEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrinterEvent::Calibrated { drawing_surface_z } => {
                write!(f, "Calibrated: drawing surface at Z {:.3}", drawing_surface_z)
            }
            PrinterEvent::PrintStarted { dots, waypoints } => {
                write!(f, "Print started: {} dots, {} waypoints", dots, waypoints)
            }
            PrinterEvent::PrintFinished {
                dots,
                succeeded,
                finished_at,
            } => write!(
                f,
                "Print finished: {} dots ({}) at {}",
                dots,
                if *succeeded { "ok" } else { "failed" },
                finished_at.format("%H:%M:%S")
            ),
            PrinterEvent::PrintDeclined => write!(f, "Print declined"),
            PrinterEvent::PrintRejected(reason) => write!(f, "Print rejected: {}", reason),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Clone)]
pub struct EventDispatcher {
    /// Broadcast sender channel for printer events.
    tx: broadcast::Sender<PrinterEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer (default 100)
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PrinterEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers
    ///
    /// Publishing with no subscribers is not an error; the event is dropped.
    pub fn publish(&self, event: PrinterEvent) -> usize {
        tracing::debug!("{}", event);
        self.tx.send(event).unwrap_or(0)
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}
