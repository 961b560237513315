//! Pose annotations.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{anyhow, Context};
use cgmath::Matrix3;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{data::Transform, error, source::HandParams};

/// Pose annotation of one clip.
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    /// Clip identifier.
    pub image_id: String,
    /// Object rotation.
    #[serde(rename = "R")]
    rotation: Matrix3Repr,
    /// Object translation.
    #[serde(rename = "t")]
    translation: Vector3Repr,
    /// Object scale.
    #[serde(rename = "s")]
    scale: ScalarRepr,
    /// Hand pose coefficients, global orientation first.
    hand_pose: Vec<f32>,
    /// Hand shape coefficients.
    #[serde(default)]
    hand_beta: Vec<f32>,
    /// Translation passed to the hand model.
    trans: Vector3Repr,
    /// Hand rotation.
    #[serde(rename = "hand_R")]
    hand_rotation: Matrix3Repr,
    /// Hand translation.
    #[serde(rename = "hand_t")]
    hand_translation: Vector3Repr,
    /// Hand scale.
    #[serde(rename = "hand_s")]
    hand_scale: ScalarRepr,
}

/// 3x3 matrix, row-major, either nested or flat.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Matrix3Repr {
    /// `[[r00, r01, r02], ...]`.
    Nested([[f32; 3]; 3]),
    /// `[r00, r01, r02, r10, ...]`.
    Flat([f32; 9]),
}

impl Matrix3Repr {
    /// Returns the matrix.
    fn to_matrix(self) -> Matrix3<f32> {
        let r = match self {
            Matrix3Repr::Nested(rows) => rows,
            Matrix3Repr::Flat(v) => [[v[0], v[1], v[2]], [v[3], v[4], v[5]], [v[6], v[7], v[8]]],
        };
        // `Matrix3::new` takes columns.
        Matrix3::new(
            r[0][0], r[1][0], r[2][0], r[0][1], r[1][1], r[2][1], r[0][2], r[1][2], r[2][2],
        )
    }
}

/// 3-vector, either flat or wrapped in a single row.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Vector3Repr {
    /// `[x, y, z]`.
    Flat([f32; 3]),
    /// `[[x, y, z]]`.
    Row([[f32; 3]; 1]),
}

impl Vector3Repr {
    /// Returns the components.
    fn to_array(self) -> [f32; 3] {
        match self {
            Vector3Repr::Flat(v) => v,
            Vector3Repr::Row([v]) => v,
        }
    }
}

/// Scalar, either bare or wrapped in a single-element list.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    /// `s`.
    Bare(f32),
    /// `[s]`.
    Wrapped([f32; 1]),
}

impl ScalarRepr {
    /// Returns the value.
    fn value(self) -> f32 {
        match self {
            ScalarRepr::Bare(v) | ScalarRepr::Wrapped([v]) => v,
        }
    }
}

impl Annotation {
    /// Returns the object rotation.
    pub fn rotation(&self) -> Matrix3<f32> {
        self.rotation.to_matrix()
    }

    /// Returns the object translation.
    pub fn translation(&self) -> [f32; 3] {
        self.translation.to_array()
    }

    /// Returns the object scale.
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Returns the object transform.
    pub fn object_transform(&self) -> error::Result<Transform> {
        Transform::new(self.rotation(), self.translation(), self.scale())
    }

    /// Returns the hand transform, applied after the hand model.
    pub fn hand_transform(&self) -> error::Result<Transform> {
        Transform::new(
            self.hand_rotation.to_matrix(),
            self.hand_translation.to_array(),
            self.hand_scale.value(),
        )
    }

    /// Returns the hand model parameters.
    pub fn hand_params(&self) -> HandParams {
        HandParams {
            pose: self.hand_pose.clone(),
            shape: self.hand_beta.clone(),
            translation: self.trans.to_array(),
        }
    }
}

/// Loads the annotation of the given clip from a JSON array of records.
///
/// When several records share the clip identifier the last one is used.
pub fn find_annotation(path: impl AsRef<Path>, clip: &str) -> anyhow::Result<Annotation> {
    let path = path.as_ref();
    debug!(
        "Loading annotations: path={}, clip={:?}",
        path.display(),
        clip
    );
    let file = File::open(path)
        .with_context(|| format!("Failed to open annotation file {}", path.display()))?;
    let records: Vec<Value> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse annotation file {}", path.display()))?;
    select(records, clip)
        .with_context(|| format!("Failed to read annotation file {}", path.display()))
}

/// Picks the last record of the clip and decodes it.
fn select(records: Vec<Value>, clip: &str) -> anyhow::Result<Annotation> {
    let record = records
        .into_iter()
        .filter(|record| record.get("image_id").and_then(Value::as_str) == Some(clip))
        .last()
        .ok_or_else(|| anyhow!("Did not find clip {:?}", clip))?;
    serde_json::from_value(record).with_context(|| format!("Invalid annotation of clip {:?}", clip))
}
