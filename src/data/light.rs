//! Directional light.

use cgmath::{InnerSpace, Vector3};

use crate::error::{Error, Result};

/// Directional light with an ambient term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Unit direction the light travels in.
    direction: Vector3<f32>,
    /// Diffuse weight.
    diffuse: f32,
    /// Ambient weight.
    ambient: f32,
}

impl Light {
    /// Creates a new `Light`.
    ///
    /// `direction` is normalized; it fails only when it has zero length.
    pub fn new(direction: impl Into<Vector3<f32>>, diffuse: f32, ambient: f32) -> Result<Self> {
        let mut light = Self::default();
        light.set_direction(direction, diffuse, ambient)?;
        Ok(light)
    }

    /// Replaces the direction and weights.
    ///
    /// On failure the light is left unchanged.
    pub fn set_direction(
        &mut self,
        direction: impl Into<Vector3<f32>>,
        diffuse: f32,
        ambient: f32,
    ) -> Result<()> {
        let direction = direction.into();
        let len = direction.magnitude();
        if !len.is_normal() {
            return Err(Error::InvalidLight);
        }
        self.direction = direction / len;
        self.diffuse = diffuse;
        self.ambient = ambient;
        Ok(())
    }

    /// Returns the unit direction.
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Returns the diffuse weight.
    pub fn diffuse(&self) -> f32 {
        self.diffuse
    }

    /// Returns the ambient weight.
    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    /// Returns the shading factor in `[0, 1]` for a unit surface normal.
    pub fn shading_factor(&self, normal: Vector3<f32>) -> f32 {
        let lambert = normal.dot(-self.direction).max(0.0);
        (self.ambient + self.diffuse * lambert).max(0.0).min(1.0)
    }
}

impl Default for Light {
    /// Light travelling away from the camera, mostly ambient.
    fn default() -> Self {
        Self {
            direction: Vector3::unit_z(),
            diffuse: 0.3,
            ambient: 0.7,
        }
    }
}
