//! Renderable content data.

pub use self::{
    geometry::GeometryMesh,
    light::Light,
    material::{Color, ColorPalette, Material},
    model::{Model, Transform},
};

mod geometry;
mod light;
mod material;
pub(crate) mod model;
