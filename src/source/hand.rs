//! Hand geometry.
//!
//! Deforming a parametric hand model is outside this crate. A [`HandModel`]
//! is any evaluator that turns [`HandParams`] into a posed mesh with fixed
//! topology.

use std::path::Path;

use anyhow::Context;
use cgmath::Vector3;
use log::debug;

use crate::{
    data::GeometryMesh,
    source::{obj, GeometrySource},
};

/// Parameters of a posed hand.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HandParams {
    /// Pose coefficients; the first three are the global orientation.
    pub pose: Vec<f32>,
    /// Shape coefficients.
    pub shape: Vec<f32>,
    /// Translation added to the evaluated vertices.
    pub translation: [f32; 3],
}

impl HandParams {
    /// Returns the global orientation (axis-angle), if present.
    pub fn global_orient(&self) -> Option<&[f32]> {
        self.pose.get(..3)
    }

    /// Returns the articulation coefficients after the global orientation.
    pub fn articulation(&self) -> &[f32] {
        self.pose.get(3..).unwrap_or(&[])
    }
}

/// Evaluator of a parametric hand model.
pub trait HandModel {
    /// Evaluates the model into a mesh.
    fn evaluate(&self, params: &HandParams) -> anyhow::Result<GeometryMesh>;
}

/// Hand mesh already deformed by an external hand model.
///
/// The stored mesh is the model output before translation; evaluation only
/// adds [`HandParams::translation`].
#[derive(Debug, Clone)]
pub struct PosedHandMesh {
    /// Posed mesh.
    mesh: GeometryMesh,
}

impl PosedHandMesh {
    /// Creates a new `PosedHandMesh`.
    pub fn new(mesh: GeometryMesh) -> Self {
        Self { mesh }
    }

    /// Loads the posed mesh from an OBJ file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mesh = obj::load(path)
            .with_context(|| format!("Failed to load posed hand mesh {}", path.display()))?;
        Ok(Self::new(mesh))
    }
}

impl HandModel for PosedHandMesh {
    fn evaluate(&self, params: &HandParams) -> anyhow::Result<GeometryMesh> {
        debug!(
            "Evaluating posed hand mesh: global_orient={:?}, articulation_len={}, shape_len={}, translation={:?}",
            params.global_orient(),
            params.articulation().len(),
            params.shape.len(),
            params.translation
        );
        let offset = Vector3::from(params.translation);
        let mut mesh = self.mesh.clone();
        for p in &mut mesh.positions {
            *p += offset;
        }
        Ok(mesh)
    }
}

/// [`GeometrySource`] evaluating a hand model with fixed parameters.
#[derive(Debug)]
pub struct HandGeometry<'a, M: ?Sized> {
    /// Hand model.
    model: &'a M,
    /// Parameters.
    params: &'a HandParams,
}

impl<'a, M: ?Sized + HandModel> HandGeometry<'a, M> {
    /// Creates a new `HandGeometry`.
    pub fn new(model: &'a M, params: &'a HandParams) -> Self {
        Self { model, params }
    }
}

impl<M: ?Sized + HandModel> GeometrySource for HandGeometry<'_, M> {
    fn load_geometry(&self) -> anyhow::Result<GeometryMesh> {
        self.model.evaluate(self.params)
    }
}
