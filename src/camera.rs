//! Perspective camera.

use cgmath::{Point2, Point3};

/// Pinhole camera at the origin looking down `+Z`.
///
/// Image `+X` points right and `+Y` points down. The focal length in pixels is
/// the longer image side `L`, and the principal point is the center of an
/// `L x L` square whose top-left corner is the image's. A non-square image is
/// thus the top-left crop of a square viewport, and the same object appears at
/// the same size whatever the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// Focal length in pixels.
    focal: f32,
    /// Principal point in pixels.
    principal: Point2<f32>,
}

impl Camera {
    /// Creates a camera for an image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let side = width.max(height) as f32;
        Self {
            width,
            height,
            focal: side,
            principal: Point2::new(side / 2.0, side / 2.0),
        }
    }

    /// Returns the resolution as `(width, height)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the focal length in pixels.
    pub fn focal_length(&self) -> f32 {
        self.focal
    }

    /// Returns the principal point in pixels.
    pub fn principal_point(&self) -> Point2<f32> {
        self.principal
    }

    /// Projects a camera space point to `(pixel_x, pixel_y, depth)`.
    ///
    /// The depth is the camera space `z`. Points with non-positive depth
    /// project to meaningless pixel coordinates and must be discarded by the
    /// caller. Points outside the image are not clipped here.
    pub fn project(&self, p: Point3<f32>) -> Point3<f32> {
        Point3::new(
            self.focal * p.x / p.z + self.principal.x,
            self.focal * p.y / p.z + self.principal.y,
            p.z,
        )
    }
}
