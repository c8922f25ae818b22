//! Data models for positions and motion
//!
//! This module provides:
//! - 3D points with Euclidean distance
//! - Waypoints (a motion target plus its acceleration limit)
//! - Motion paths (ordered waypoint batches executed as one motion)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in the robot's 3D work space (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3D {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Copy of this point with the X and Y axes replaced
    pub fn with_xy(&self, x: f64, y: f64) -> Self {
        Self { x, y, z: self.z }
    }

    /// Copy of this point with the Z axis replaced
    pub fn with_z(&self, z: f64) -> Self {
        Self { z, ..*self }
    }
}

impl Default for Point3D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}

/// A single commanded motion target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Target X (mm)
    pub x: f64,
    /// Target Y (mm)
    pub y: f64,
    /// Target Z (mm)
    pub z: f64,
    /// Maximum acceleration allowed while reaching this target
    pub max_acceleration: f64,
}

impl Waypoint {
    /// Create a waypoint
    pub const fn new(x: f64, y: f64, z: f64, max_acceleration: f64) -> Self {
        Self {
            x,
            y,
            z,
            max_acceleration,
        }
    }

    /// Create a waypoint targeting `point`
    pub fn at(point: Point3D, max_acceleration: f64) -> Self {
        Self::new(point.x, point.y, point.z, max_acceleration)
    }

    /// The target position of this waypoint
    pub fn position(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3} Y:{:.3} Z:{:.3} A:{:.1}",
            self.x, self.y, self.z, self.max_acceleration
        )
    }
}

/// Ordered batch of waypoints executed as one continuous motion
///
/// Insertion order is execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionPath {
    waypoints: Vec<Waypoint>,
}

impl MotionPath {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty path with room for `capacity` waypoints
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            waypoints: Vec::with_capacity(capacity),
        }
    }

    /// Append a waypoint to the end of the path
    pub fn push(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the path has no waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Remove every waypoint
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Waypoints in execution order
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Iterate over the waypoints in execution order
    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    /// Total straight-line distance covered when executed from `start`
    pub fn travel_distance(&self, start: Point3D) -> f64 {
        self.waypoints
            .iter()
            .fold((0.0, start), |(total, from), waypoint| {
                let to = waypoint.position();
                (total + from.distance(&to), to)
            })
            .0
    }
}

impl Extend<Waypoint> for MotionPath {
    fn extend<T: IntoIterator<Item = Waypoint>>(&mut self, iter: T) {
        self.waypoints.extend(iter);
    }
}

impl FromIterator<Waypoint> for MotionPath {
    fn from_iter<T: IntoIterator<Item = Waypoint>>(iter: T) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MotionPath {
    type Item = Waypoint;
    type IntoIter = std::vec::IntoIter<Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.into_iter()
    }
}

impl<'a> IntoIterator for &'a MotionPath {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}
