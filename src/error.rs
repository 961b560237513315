//! Rendering errors.

use std::fmt;

/// Result type of the rendering core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the rendering core.
///
/// Every variant is a caller contract violation. A render invocation that
/// fails produces no partial output.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Material color name is not in the palette.
    UnknownColor {
        /// Requested name.
        name: String,
    },
    /// Light direction has zero length.
    InvalidLight,
    /// Background raster size differs from the camera resolution.
    ResolutionMismatch {
        /// Camera resolution `(width, height)`.
        expected: (u32, u32),
        /// Background raster size `(width, height)`.
        actual: (u32, u32),
    },
    /// A face references a vertex that does not exist.
    MeshIndex {
        /// Face position in the face list.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// Rotation matrix is not orthonormal.
    NonOrthonormalRotation,
    /// Scale is not a positive finite number.
    InvalidScale {
        /// Given scale.
        scale: f32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownColor { name } => write!(f, "unknown color name: {:?}", name),
            Error::InvalidLight => f.write_str("light direction must not be a zero vector"),
            Error::ResolutionMismatch { expected, actual } => write!(
                f,
                "background is {}x{} but the camera renders {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Error::MeshIndex {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} references vertex {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
            Error::NonOrthonormalRotation => f.write_str("rotation matrix is not orthonormal"),
            Error::InvalidScale { scale } => write!(f, "scale must be positive: {}", scale),
        }
    }
}

impl std::error::Error for Error {}
