//! Renderer.

use image::{Rgb, RgbImage};
use log::{debug, trace};

use crate::{
    camera::Camera,
    data::{Color, Light, Model},
    error::{Error, Result},
};

mod raster;

/// Normal interpolation across a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// One normal per face.
    Flat,
    /// Vertex normals averaged from adjacent faces, interpolated per pixel.
    Smooth,
}

impl Default for Shading {
    fn default() -> Self {
        Shading::Flat
    }
}

/// Renders models over a background and returns the composited frame.
///
/// The renderer keeps only its configuration between calls.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Camera.
    camera: Camera,
    /// Light.
    light: Light,
    /// Background color used when no photograph is given.
    background_color: Color,
    /// Shading mode.
    shading: Shading,
}

impl Renderer {
    /// Creates a renderer for frames of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_camera(Camera::new(width, height))
    }

    /// Creates a renderer with the given camera.
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera,
            light: Light::default(),
            background_color: Color::new(1.0, 1.0, 1.0),
            shading: Shading::default(),
        }
    }

    /// Sets the light.
    pub fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    /// Sets the background color.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Sets the shading mode.
    pub fn set_shading(&mut self, shading: Shading) {
        self.shading = shading;
    }

    /// Renders the models over the background.
    ///
    /// Starts from a copy of `background`, or from the background color when
    /// it is `None`, and draws every model with depth testing. Pixels no
    /// triangle covers keep the background value. When triangles of two
    /// models meet at exactly the same depth, the model later in `models`
    /// wins; within one model the first face drawn wins.
    ///
    /// Fails if `background` is not exactly the camera resolution.
    pub fn render<'a>(
        &self,
        models: impl IntoIterator<Item = &'a Model>,
        background: Option<&RgbImage>,
    ) -> Result<RgbImage> {
        let (width, height) = self.camera.resolution();
        let mut frame = match background {
            Some(image) => {
                if image.dimensions() != (width, height) {
                    return Err(Error::ResolutionMismatch {
                        expected: (width, height),
                        actual: image.dimensions(),
                    });
                }
                image.clone()
            }
            None => RgbImage::from_pixel(width, height, to_rgb8(self.background_color)),
        };

        let mut triangles = Vec::new();
        let mut stats = raster::SetupStats::default();
        let mut model_count = 0;
        for (index, model) in models.into_iter().enumerate() {
            trace!(
                "Setting up model {}: name={:?}, faces={}",
                index,
                model.name(),
                model.geometry().faces().len()
            );
            raster::setup_model(
                index,
                model,
                &self.camera,
                self.shading,
                &mut triangles,
                &mut stats,
            );
            model_count += 1;
        }
        debug!(
            "Rendering {}x{}: focal={}, principal={:?}, shading={:?}, models={}, triangles={}, \
             behind_camera={}, off_screen={}, degenerate={}",
            width,
            height,
            self.camera.focal_length(),
            self.camera.principal_point(),
            self.shading,
            model_count,
            stats.queued,
            stats.behind_camera,
            stats.off_screen,
            stats.degenerate
        );

        raster::rasterize(&triangles, &self.light, &mut frame);
        Ok(frame)
    }
}

/// Converts a color in `[0, 1]` to 8-bit RGB.
pub(crate) fn to_rgb8(color: Color) -> Rgb<u8> {
    /// Converts a single component.
    fn channel(v: f32) -> u8 {
        (v.max(0.0).min(1.0) * 255.0).round() as u8
    }
    Rgb([channel(color.r), channel(color.g), channel(color.b)])
}
