//! Geometry.

use cgmath::{Point3, Vector3};

use crate::error::{Error, Result};

/// Triangle mesh geometry.
///
/// Positions are in the local frame of the mesh, and each face is a triple of
/// indices into the positions.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GeometryMesh {
    /// Positions.
    pub(crate) positions: Vec<Point3<f32>>,
    /// Triangles.
    pub(crate) faces: Vec<[u32; 3]>,
}

impl GeometryMesh {
    /// Creates a new `GeometryMesh`.
    ///
    /// Face indices are not checked here; see [`GeometryMesh::validate`].
    pub fn new(positions: Vec<Point3<f32>>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Returns the vertex positions.
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// Returns the triangles.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Checks that every face references an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.positions.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(Error::MeshIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Moves the vertex mean to the origin.
    ///
    /// With `flip_y`, the Y axis is mirrored and every face winding is
    /// reversed so that faces keep their outward orientation.
    pub fn centered(mut self, flip_y: bool) -> Self {
        if self.positions.is_empty() {
            return self;
        }
        let sum = self
            .positions
            .iter()
            .fold(Vector3::<f64>::new(0.0, 0.0, 0.0), |acc, p| {
                acc + Vector3::new(f64::from(p.x), f64::from(p.y), f64::from(p.z))
            });
        let mean = sum / self.positions.len() as f64;
        let mean = Vector3::new(mean.x as f32, mean.y as f32, mean.z as f32);

        for p in &mut self.positions {
            *p -= mean;
            if flip_y {
                p.y = -p.y;
            }
        }
        if flip_y {
            for face in &mut self.faces {
                face.swap(0, 2);
            }
        }
        self
    }

}
