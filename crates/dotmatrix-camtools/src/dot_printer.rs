//! Dot Printer Path Planning
//!
//! Converts a dot image into pen motion using a boustrophedon raster scan:
//! even rows run left to right, odd rows right to left. Each dot becomes
//! three waypoints (lift at the current position, travel at the same height,
//! press onto the drawing surface). Long jumps lift the pen higher than hops
//! between neighbouring dots.
//!
//! The image is centered on the robot's origin; row 0 is the top edge
//! (positive Y).

use crate::DotImage;
use dotmatrix_core::{BoxedIterator, ImageError, MotionPath, Point3D, Waypoint};
use serde::{Deserialize, Serialize};

/// Dot printing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPrintParameters {
    /// Maximum image width in dots
    pub max_width_dots: usize,
    /// Maximum image height in dots
    pub max_height_dots: usize,
    /// Distance between neighbouring dots (mm)
    pub mm_per_dot: f64,
    /// Lift above the drawing surface for short hops (mm)
    pub elevation_small: f64,
    /// Lift above the drawing surface for long jumps (mm)
    pub elevation_large: f64,
    /// Hops strictly longer than this use the large lift (mm)
    pub movement_threshold: f64,
    /// Acceleration for every waypoint
    pub acceleration: f64,
}

impl Default for DotPrintParameters {
    fn default() -> Self {
        Self {
            max_width_dots: 75,
            max_height_dots: 75,
            mm_per_dot: 1.0,
            elevation_small: 1.5,
            elevation_large: 10.0,
            movement_threshold: 2.0,
            acceleration: 50.0,
        }
    }
}

/// Statistics about a planned print
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSummary {
    /// Dots pressed
    pub dots: usize,
    /// Hops that used the large lift
    pub large_lifts: usize,
    /// Straight-line distance covered by the path (mm)
    pub travel_mm: f64,
    /// Where the pen rests once the path completes
    pub end: Point3D,
}

/// A planned print: the waypoints plus what they amount to
#[derive(Debug, Clone, PartialEq)]
pub struct DotPlan {
    /// Waypoints in execution order
    pub path: MotionPath,
    /// Plan statistics
    pub summary: PlanSummary,
}

/// Path planner for dot images
#[derive(Debug, Clone)]
pub struct DotPathPlanner {
    params: DotPrintParameters,
}

impl DotPathPlanner {
    /// Create a planner
    pub fn new(params: DotPrintParameters) -> Self {
        Self { params }
    }

    /// Planner parameters
    pub fn params(&self) -> &DotPrintParameters {
        &self.params
    }

    /// Check that the image fits the draw field
    pub fn check_bounds(&self, width: usize, height: usize) -> Result<(), ImageError> {
        if width > self.params.max_width_dots || height > self.params.max_height_dots {
            return Err(ImageError::OutOfBounds {
                width,
                height,
                max_width: self.params.max_width_dots,
                max_height: self.params.max_height_dots,
            });
        }
        Ok(())
    }

    /// Offsets that center an image of the given size on the origin
    pub fn offsets(&self, width: usize, height: usize) -> (f64, f64) {
        let offset_x = -(width as f64 * self.params.mm_per_dot) / 2.0;
        let offset_y = (height as f64 * self.params.mm_per_dot) / 2.0;
        (offset_x, offset_y)
    }

    /// Robot (x, y) of the dot at (`col`, `row`)
    pub fn dot_position(&self, width: usize, height: usize, col: usize, row: usize) -> (f64, f64) {
        let (offset_x, offset_y) = self.offsets(width, height);
        (
            offset_x + col as f64 * self.params.mm_per_dot,
            offset_y - row as f64 * self.params.mm_per_dot,
        )
    }

    /// Columns of `row` in scan order
    fn row_columns(width: usize, row: usize) -> BoxedIterator<usize> {
        if row % 2 == 0 {
            Box::new(0..width)
        } else {
            Box::new((0..width).rev())
        }
    }

    /// Dots of the image as (`col`, `row`) in the order they are printed
    pub fn scan_order(&self, image: &DotImage) -> Vec<(usize, usize)> {
        let mut order = Vec::with_capacity(image.dot_count());
        for row in 0..image.height() {
            for col in Self::row_columns(image.width(), row) {
                if image.is_dot(col, row) {
                    order.push((col, row));
                }
            }
        }
        order
    }

    /// Whether a hop from `cursor` to `target` needs the large lift
    pub fn is_long_jump(&self, cursor: &Point3D, target: &Point3D) -> bool {
        cursor.distance(target) > self.params.movement_threshold
    }

    /// Lift height for a hop from `cursor` to `target`
    pub fn elevation_for(&self, cursor: &Point3D, target: &Point3D) -> f64 {
        if self.is_long_jump(cursor, target) {
            self.params.elevation_large
        } else {
            self.params.elevation_small
        }
    }

    /// Plan the print of `image` onto a surface at `drawing_z`
    ///
    /// `start` is where the pen is when the path begins. Nothing is planned
    /// for an image that does not fit the draw field.
    pub fn plan(
        &self,
        image: &DotImage,
        drawing_z: f64,
        start: Point3D,
    ) -> Result<DotPlan, ImageError> {
        let (width, height) = (image.width(), image.height());
        self.check_bounds(width, height)?;

        let acceleration = self.params.acceleration;
        let order = self.scan_order(image);
        let mut path = MotionPath::with_capacity(order.len() * 3);
        let mut cursor = start;
        let mut large_lifts = 0;

        for (col, row) in &order {
            let (x, y) = self.dot_position(width, height, *col, *row);
            let target = cursor.with_xy(x, y);
            if self.is_long_jump(&cursor, &target) {
                large_lifts += 1;
            }
            let elevation = self.elevation_for(&cursor, &target);
            let lifted = drawing_z + elevation;

            path.push(Waypoint::new(cursor.x, cursor.y, lifted, acceleration));
            path.push(Waypoint::new(x, y, lifted, acceleration));
            path.push(Waypoint::new(x, y, drawing_z, acceleration));

            cursor = Point3D::new(x, y, drawing_z);
        }

        let summary = PlanSummary {
            dots: order.len(),
            large_lifts,
            travel_mm: path.travel_distance(start),
            end: cursor,
        };

        tracing::info!(
            "Planned {}x{} image: {} dots, {} long jumps, {} waypoints, {:.1} mm travel",
            width,
            height,
            summary.dots,
            summary.large_lifts,
            path.len(),
            summary.travel_mm
        );

        Ok(DotPlan { path, summary })
    }
}
