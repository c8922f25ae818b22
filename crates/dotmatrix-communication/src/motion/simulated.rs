//! Simulated motion service
//!
//! Stands in for the delta robot when none is attached. Every request is
//! recorded in a [`MotionLog`] that can be cloned and inspected from another
//! thread. An optional Z floor makes the simulator reject targets below the
//! robot's reach, which exercises the client's failure handling.

use super::{MotionService, MovePathResponse, MoveToPointResponse};
use dotmatrix_core::{thread_safe_vec, MotionError, ThreadSafeVec, Waypoint};

/// Shared record of the requests a [`SimulatedMotionService`] received
#[derive(Debug, Clone, Default)]
pub struct MotionLog {
    points: ThreadSafeVec<Waypoint>,
    paths: ThreadSafeVec<Vec<Waypoint>>,
}

impl MotionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            points: thread_safe_vec(),
            paths: thread_safe_vec(),
        }
    }

    /// Single-point requests in arrival order
    pub fn points(&self) -> Vec<Waypoint> {
        self.points.lock().clone()
    }

    /// Path requests in arrival order
    pub fn paths(&self) -> Vec<Vec<Waypoint>> {
        self.paths.lock().clone()
    }

    /// Forget every recorded request
    pub fn clear(&self) {
        self.points.lock().clear();
        self.paths.lock().clear();
    }
}

/// In-process motion service that accepts reachable targets
#[derive(Debug, Default)]
pub struct SimulatedMotionService {
    log: MotionLog,
    z_floor: Option<f64>,
}

impl SimulatedMotionService {
    /// Create a simulator that accepts every target
    pub fn new() -> Self {
        Self {
            log: MotionLog::new(),
            z_floor: None,
        }
    }

    /// Reject any target whose Z lies below `z_floor`
    pub fn with_z_floor(mut self, z_floor: f64) -> Self {
        self.z_floor = Some(z_floor);
        self
    }

    /// Handle to the request log
    pub fn log(&self) -> MotionLog {
        self.log.clone()
    }

    fn unreachable(&self, motion: &Waypoint) -> Option<String> {
        match self.z_floor {
            Some(floor) if motion.z < floor => Some(format!(
                "Z {:.3} is below the reachable floor {:.3}",
                motion.z, floor
            )),
            _ => None,
        }
    }
}

impl MotionService for SimulatedMotionService {
    fn move_to_point(&mut self, motion: &Waypoint) -> Result<MoveToPointResponse, MotionError> {
        self.log.points.lock().push(*motion);

        Ok(match self.unreachable(motion) {
            Some(reason) => MoveToPointResponse::failed(reason),
            None => MoveToPointResponse::ok(),
        })
    }

    fn move_path(&mut self, motions: &[Waypoint]) -> Result<MovePathResponse, MotionError> {
        self.log.paths.lock().push(motions.to_vec());

        Ok(motions
            .iter()
            .find_map(|motion| self.unreachable(motion))
            .map(MovePathResponse::failed)
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "simulated robot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_requests() {
        let mut service = SimulatedMotionService::new();
        let log = service.log();

        let point = Waypoint::new(1.0, 2.0, -190.0, 5.0);
        assert!(service.move_to_point(&point).unwrap().succeeded);
        assert!(service
            .move_path(&[point, point])
            .unwrap()
            .is_success());

        assert_eq!(log.points(), vec![point]);
        assert_eq!(log.paths(), vec![vec![point, point]]);

        log.clear();
        assert!(log.points().is_empty());
    }

    #[test]
    fn test_z_floor_rejects_unreachable_targets() {
        let mut service = SimulatedMotionService::new().with_z_floor(-200.0);

        let low = Waypoint::new(0.0, 0.0, -210.0, 5.0);
        let response = service.move_to_point(&low).unwrap();
        assert!(!response.succeeded);
        assert_eq!(
            response.message,
            "Z -210.000 is below the reachable floor -200.000"
        );

        let ok = Waypoint::new(0.0, 0.0, -190.0, 5.0);
        assert!(!service.move_path(&[ok, low]).unwrap().is_success());
        assert!(service.move_path(&[ok]).unwrap().is_success());
    }
}
