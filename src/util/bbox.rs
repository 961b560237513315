//! Bounding box.

use std::iter::FromIterator;

use cgmath::{num_traits::Float, Point3, Vector3};

/// 3D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3d<S> {
    /// Minimum.
    min: Point3<S>,
    /// Maximum.
    max: Point3<S>,
}

impl<S: Float> BoundingBox3d<S> {
    /// Returns minimum xyz.
    pub fn min(&self) -> Point3<S> {
        self.min
    }

    /// Returns maximum xyz.
    pub fn max(&self) -> Point3<S> {
        self.max
    }

    /// Returns the extent along each axis.
    pub fn size(&self) -> Vector3<S> {
        Vector3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Returns the center point.
    pub fn center(&self) -> Point3<S> {
        let two = S::one() + S::one();
        Point3::new(
            (self.min.x + self.max.x) / two,
            (self.min.y + self.max.y) / two,
            (self.min.z + self.max.z) / two,
        )
    }

    /// Extends the bounding box to contain the given point.
    pub fn insert(&self, p: Point3<S>) -> Self {
        Self {
            min: Point3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z)),
            max: Point3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z)),
        }
    }
}

impl<S: Float> From<Point3<S>> for BoundingBox3d<S> {
    fn from(p: Point3<S>) -> Self {
        Self { min: p, max: p }
    }
}

/// 3D bounding box, which can be empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionalBoundingBox3d<S> {
    /// Bounding box.
    bbox: Option<BoundingBox3d<S>>,
}

impl<S: Float> OptionalBoundingBox3d<S> {
    /// Creates an empty bounding box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bounding box, or `None` if nothing was inserted.
    pub fn bounding_box(&self) -> Option<BoundingBox3d<S>> {
        self.bbox
    }

    /// Extends the bounding box to contain the given point.
    pub fn insert(&self, p: Point3<S>) -> Self {
        let bbox = self
            .bbox
            .map_or_else(|| BoundingBox3d::from(p), |bbox| bbox.insert(p));
        Self { bbox: Some(bbox) }
    }
}

impl<S> Default for OptionalBoundingBox3d<S> {
    fn default() -> Self {
        Self { bbox: None }
    }
}

impl<S: Float> FromIterator<Point3<S>> for OptionalBoundingBox3d<S> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Point3<S>>,
    {
        iter.into_iter().fold(Self::new(), |bbox, p| bbox.insert(p))
    }
}

impl<'a, S: 'a + Float> FromIterator<&'a Point3<S>> for OptionalBoundingBox3d<S> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = &'a Point3<S>>,
    {
        iter.into_iter().cloned().collect()
    }
}
