//! Motion client with committed position tracking
//!
//! Wraps a [`MotionService`] and owns the two pieces of mutable motion state:
//! - the committed effector location, updated only after a confirmed move
//! - the pending path batch, emptied after every submission
//!
//! Service failures are logged and returned as outcomes; they never abort
//! the caller.

use super::MotionService;
use dotmatrix_core::{MotionError, MotionPath, Point3D, Waypoint};
use std::time::{Duration, Instant};

/// Result of a single-point move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The robot reached the point; it is now the committed location
    Moved(Point3D),
    /// The move failed; the committed location is unchanged
    Failed(MotionError),
}

impl MoveOutcome {
    /// Whether the move succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Result of a path submission
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    /// Number of waypoints submitted
    pub waypoints: usize,
    /// Wall time spent in the service call
    pub elapsed: Duration,
    /// Failure reported by the service, if any
    pub error: Option<MotionError>,
}

impl PathOutcome {
    /// Whether the path executed without a reported failure
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Client for the external motion service
pub struct MotionClient {
    /// The underlying service
    service: Box<dyn MotionService>,
    /// Acceleration used when the caller does not pick one
    default_acceleration: f64,
    /// Last position confirmed by the service
    effector_location: Point3D,
    /// Waypoints waiting for the next submission
    pending: MotionPath,
}

impl MotionClient {
    /// Create a new client; the effector is assumed to be at the origin
    pub fn new(service: Box<dyn MotionService>, default_acceleration: f64) -> Self {
        Self::with_location(service, default_acceleration, Point3D::default())
    }

    /// Create a new client with a known effector location
    pub fn with_location(
        service: Box<dyn MotionService>,
        default_acceleration: f64,
        effector_location: Point3D,
    ) -> Self {
        Self {
            service,
            default_acceleration,
            effector_location,
            pending: MotionPath::new(),
        }
    }

    /// Last position confirmed by the motion service
    pub fn effector_location(&self) -> Point3D {
        self.effector_location
    }

    /// Acceleration used by [`MotionClient::move_to_point_default`]
    pub fn default_acceleration(&self) -> f64 {
        self.default_acceleration
    }

    /// Number of waypoints waiting for submission
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Move to a point using the default acceleration
    pub fn move_to_point_default(&mut self, x: f64, y: f64, z: f64) -> MoveOutcome {
        self.move_to_point(x, y, z, self.default_acceleration)
    }

    /// Move to a single point
    ///
    /// On success the committed effector location becomes `(x, y, z)`.
    /// On failure it is left untouched and the failure is logged.
    pub fn move_to_point(&mut self, x: f64, y: f64, z: f64, max_acceleration: f64) -> MoveOutcome {
        let motion = Waypoint::new(x, y, z, max_acceleration);

        let error = match self.service.move_to_point(&motion) {
            Ok(response) if response.succeeded => {
                self.effector_location = Point3D::new(x, y, z);
                tracing::debug!("Moved to {}", self.effector_location);
                return MoveOutcome::Moved(self.effector_location);
            }
            Ok(response) => MotionError::MoveRejected {
                x,
                y,
                z,
                message: response.message,
            },
            Err(e) => e,
        };

        tracing::error!(
            "Moving to point ({},{},{},{}) failed: {}",
            x,
            y,
            z,
            max_acceleration,
            error
        );
        MoveOutcome::Failed(error)
    }

    /// Move to `point` using the default acceleration
    pub fn move_to(&mut self, point: Point3D) -> MoveOutcome {
        self.move_to_point_default(point.x, point.y, point.z)
    }

    /// Queue a waypoint for the next submission
    pub fn append_to_path(&mut self, waypoint: Waypoint) {
        self.pending.push(waypoint);
    }

    /// Queue every waypoint of `path`, keeping its order
    pub fn extend_path(&mut self, path: MotionPath) {
        self.pending.extend(path);
    }

    /// Execute the pending batch as one motion
    ///
    /// The batch is cleared whatever the outcome. The committed effector
    /// location is not updated; callers track position through the path.
    pub fn submit_path(&mut self) -> PathOutcome {
        let waypoints = self.pending.len();
        let started = Instant::now();

        let result = self.service.move_path(self.pending.waypoints());
        let elapsed = started.elapsed();
        self.pending.clear();

        let error = match result {
            Ok(response) if response.is_success() => None,
            Ok(response) => Some(MotionError::PathFailed {
                message: response.message,
            }),
            Err(e) => Some(e),
        };

        match &error {
            None => tracing::info!(
                "Path of {} waypoints executed by {} in {} ms",
                waypoints,
                self.service.name(),
                elapsed.as_millis()
            ),
            Some(e) => tracing::error!("Path of {} waypoints failed: {}", waypoints, e),
        }

        PathOutcome {
            waypoints,
            elapsed,
            error,
        }
    }

    /// Queue `path` and execute it immediately
    pub fn execute_path(&mut self, path: MotionPath) -> PathOutcome {
        self.extend_path(path);
        self.submit_path()
    }
}

impl std::fmt::Debug for MotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionClient")
            .field("service", &self.service.name())
            .field("default_acceleration", &self.default_acceleration)
            .field("effector_location", &self.effector_location)
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{MovePathResponse, MoveToPointResponse};

    struct RejectAll;

    impl MotionService for RejectAll {
        fn move_to_point(&mut self, _motion: &Waypoint) -> Result<MoveToPointResponse, MotionError> {
            Ok(MoveToPointResponse::failed("point outside work envelope"))
        }

        fn move_path(&mut self, _motions: &[Waypoint]) -> Result<MovePathResponse, MotionError> {
            Ok(MovePathResponse::failed("path rejected"))
        }
    }

    #[test]
    fn test_failed_move_keeps_location() {
        let start = Point3D::new(0.0, 0.0, -196.063);
        let mut client = MotionClient::with_location(Box::new(RejectAll), 50.0, start);

        let outcome = client.move_to_point(10.0, 10.0, -150.0, 5.0);

        assert!(!outcome.is_success());
        assert_eq!(client.effector_location(), start);
        match outcome {
            MoveOutcome::Failed(MotionError::MoveRejected { message, .. }) => {
                assert_eq!(message, "point outside work envelope");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_failed_path_still_clears_batch() {
        let mut client = MotionClient::new(Box::new(RejectAll), 50.0);
        client.append_to_path(Waypoint::new(0.0, 0.0, 0.0, 50.0));
        client.append_to_path(Waypoint::new(1.0, 0.0, 0.0, 50.0));
        assert_eq!(client.pending_len(), 2);

        let outcome = client.submit_path();

        assert_eq!(outcome.waypoints, 2);
        assert_eq!(
            outcome.error,
            Some(MotionError::PathFailed {
                message: "path rejected".to_string()
            })
        );
        assert_eq!(client.pending_len(), 0);
        assert_eq!(client.effector_location(), Point3D::default());
    }
}
