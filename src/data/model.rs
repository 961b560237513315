//! Model.

use cgmath::{EuclideanSpace, InnerSpace, Matrix, Matrix3, Point3, SquareMatrix, Vector3};
use log::debug;

use crate::{
    data::{GeometryMesh, Material},
    error::{Error, Result},
    util::bbox::OptionalBoundingBox3d,
};

/// Tolerance of the orthonormality check, per element of `R^T R - I`.
const ORTHONORMAL_TOLERANCE: f32 = 1e-3;

/// Rigid transform with uniform scale.
///
/// A local point `p` maps to `rotation * (scale * p) + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation.
    rotation: Matrix3<f32>,
    /// Translation.
    translation: Vector3<f32>,
    /// Uniform scale.
    scale: f32,
}

impl Transform {
    /// Creates a new `Transform`.
    ///
    /// Fails if `rotation` is not orthonormal or `scale` is not positive.
    pub fn new(
        rotation: Matrix3<f32>,
        translation: impl Into<Vector3<f32>>,
        scale: f32,
    ) -> Result<Self> {
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(Error::InvalidScale { scale });
        }
        if !is_orthonormal(&rotation) {
            return Err(Error::NonOrthonormalRotation);
        }
        Ok(Self {
            rotation,
            translation: translation.into(),
            scale,
        })
    }

    /// Returns the identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }

    /// Returns a translation-only transform.
    pub fn from_translation(translation: impl Into<Vector3<f32>>) -> Self {
        Self {
            translation: translation.into(),
            ..Self::identity()
        }
    }

    /// Returns the rotation.
    pub fn rotation(&self) -> Matrix3<f32> {
        self.rotation
    }

    /// Returns the translation.
    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    /// Returns the scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Applies the transform to a point.
    pub fn apply(&self, p: Point3<f32>) -> Point3<f32> {
        let local = Vector3::new(p.x, p.y, p.z) * self.scale;
        Point3::from_vec(self.rotation * local + self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Returns whether `R^T R` is the identity within tolerance.
fn is_orthonormal(m: &Matrix3<f32>) -> bool {
    let product = m.transpose() * *m;
    let identity = Matrix3::<f32>::identity();
    (0..3).all(|c| {
        (0..3).all(|r| {
            let diff = product[c][r] - identity[c][r];
            diff.abs() <= ORTHONORMAL_TOLERANCE
        })
    })
}

/// Renderable mesh instance.
///
/// Immutable once constructed; the same model can be passed to any number of
/// render calls.
#[derive(Debug, Clone)]
pub struct Model {
    /// Name.
    pub(crate) name: Option<String>,
    /// Local geometry.
    pub(crate) geometry: GeometryMesh,
    /// Local to world transform.
    pub(crate) transform: Transform,
    /// Material.
    pub(crate) material: Material,
}

impl Model {
    /// Creates a new `Model`.
    ///
    /// Fails with [`Error::MeshIndex`] if a face references a missing vertex.
    pub fn new(geometry: GeometryMesh, transform: Transform, material: Material) -> Result<Self> {
        geometry.validate()?;
        let model = Self {
            name: None,
            geometry,
            transform,
            material,
        };
        match model.world_bounding_box().bounding_box() {
            Some(bbox) => debug!(
                "Model created: vertices={}, faces={}, material={:?}, world_center={:?}, world_size={:?}",
                model.geometry.positions.len(),
                model.geometry.faces.len(),
                model.material.name(),
                bbox.center(),
                bbox.size()
            ),
            None => debug!(
                "Model created without vertices: material={:?}",
                model.material.name()
            ),
        }
        Ok(model)
    }

    /// Returns the model with the given name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the model with its material replaced by an explicit color.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Returns the model name if available.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(AsRef::as_ref)
    }

    /// Returns the local geometry.
    pub fn geometry(&self) -> &GeometryMesh {
        &self.geometry
    }

    /// Returns the transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Returns the material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Returns the vertex positions in world space.
    ///
    /// The camera sits at the world origin, so these are also camera space
    /// positions.
    pub fn to_world_space(&self) -> Vec<Point3<f32>> {
        self.geometry
            .positions
            .iter()
            .map(|&p| self.transform.apply(p))
            .collect()
    }

    /// Returns the bounding box in world space.
    pub fn world_bounding_box(&self) -> OptionalBoundingBox3d<f32> {
        self.geometry
            .positions
            .iter()
            .map(|&p| self.transform.apply(p))
            .collect()
    }
}

/// Returns the unnormalized normal of the triangle `(a, b, c)`.
///
/// Counter-clockwise winding, seen from the side the normal points to.
pub(crate) fn face_normal(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Vector3<f32> {
    (b - a).cross(c - a)
}

/// Returns unit vertex normals, averaged from the area-weighted face normals.
///
/// Vertices not referenced by any face get a zero normal.
pub(crate) fn vertex_normals(positions: &[Point3<f32>], faces: &[[u32; 3]]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];
    for &[i0, i1, i2] in faces {
        let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
        let n = face_normal(positions[i0], positions[i1], positions[i2]);
        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }
    for n in &mut normals {
        let len = n.magnitude();
        if len > 0.0 {
            *n /= len;
        }
    }
    normals
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use cgmath::Rad;

    use super::*;
    use crate::data::Color;

    fn mesh() -> GeometryMesh {
        GeometryMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.5, -2.0, 3.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        )
    }

    fn material() -> Material {
        Material::from_color(Color::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn identity_keeps_positions() {
        let model = Model::new(mesh(), Transform::identity(), material()).expect("valid mesh");
        assert_eq!(model.to_world_space(), mesh().positions().to_vec());
    }

    #[test]
    fn material_override() {
        let model = Model::new(mesh(), Transform::identity(), material())
            .expect("valid mesh")
            .with_name("object")
            .with_material(Material::from_color(Color::new(0.0, 0.0, 1.0)));
        assert_eq!(model.name(), Some("object"));
        assert_eq!(model.material().color(), Color::new(0.0, 0.0, 1.0));
        assert_eq!(model.material().name(), None);
    }

    #[test]
    fn scale_rotate_translate() {
        let rotation = Matrix3::from_angle_z(Rad(FRAC_PI_2));
        let transform = Transform::new(rotation, [0.0, 0.0, 5.0], 2.0).expect("valid transform");
        let p = transform.apply(Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 2.0, 5.0)).magnitude() < 1e-5);
    }

    #[test]
    fn reject_non_orthonormal() {
        let skew = Matrix3::new(1.0, 0.0, 0.0, 0.5, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(
            Transform::new(skew, [0.0, 0.0, 0.0], 1.0),
            Err(Error::NonOrthonormalRotation)
        );
        let scaled = Matrix3::from_value(2.0);
        assert_eq!(
            Transform::new(scaled, [0.0, 0.0, 0.0], 1.0),
            Err(Error::NonOrthonormalRotation)
        );
    }

    #[test]
    fn reject_bad_scale() {
        assert_eq!(
            Transform::new(Matrix3::identity(), [0.0, 0.0, 0.0], 0.0),
            Err(Error::InvalidScale { scale: 0.0 })
        );
        assert!(Transform::new(Matrix3::identity(), [0.0, 0.0, 0.0], -1.0).is_err());
    }

    #[test]
    fn reject_bad_face_index() {
        let mut geometry = mesh();
        geometry.faces.push([0, 1, 9]);
        let err = Model::new(geometry, Transform::identity(), material()).unwrap_err();
        assert_eq!(
            err,
            Error::MeshIndex {
                face: 2,
                index: 9,
                vertex_count: 4,
            }
        );
    }

    #[test]
    fn normals_follow_winding() {
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let n = face_normal(positions[0], positions[1], positions[2]);
        assert_eq!(n, Vector3::new(0.0, 0.0, 1.0));

        let normals = vertex_normals(&positions, &[[0, 2, 1]]);
        for n in normals {
            assert!((n - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);
        }
    }
}
