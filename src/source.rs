//! Geometry sources.
//!
//! Anything that produces vertices and faces, whether a mesh file or a
//! parametric hand model, is a [`GeometrySource`]. The renderer only ever
//! sees the resulting [`GeometryMesh`].

use std::path::{Path, PathBuf};

use crate::data::GeometryMesh;

pub use self::{
    annotation::{find_annotation, Annotation},
    hand::{HandGeometry, HandModel, HandParams, PosedHandMesh},
};

pub mod annotation;
pub mod hand;
pub mod obj;
mod triangulator;

/// Producer of triangle mesh geometry.
pub trait GeometrySource {
    /// Produces the geometry.
    fn load_geometry(&self) -> anyhow::Result<GeometryMesh>;
}

/// Wavefront OBJ file.
#[derive(Debug, Clone)]
pub struct ObjFile {
    /// Path.
    path: PathBuf,
}

impl ObjFile {
    /// Creates a new `ObjFile`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl GeometrySource for ObjFile {
    fn load_geometry(&self) -> anyhow::Result<GeometryMesh> {
        obj::load(&self.path)
    }
}

impl GeometrySource for GeometryMesh {
    fn load_geometry(&self) -> anyhow::Result<GeometryMesh> {
        Ok(self.clone())
    }
}
