//! Triangle setup and rasterization.

use cgmath::{EuclideanSpace, InnerSpace, Point2, Vector3};
use image::RgbImage;
use rayon::prelude::*;

use crate::{
    camera::Camera,
    data::{model, Color, Light, Model},
    render::{to_rgb8, Shading},
};

/// Number of image rows owned by one parallel task.
const BAND_ROWS: usize = 16;

/// Owner value of pixels no model has covered.
const NO_OWNER: usize = usize::MAX;

/// Projected triangle ready to be rasterized.
#[derive(Debug, Clone)]
pub(super) struct Triangle {
    /// Index of the model in the render call.
    model: usize,
    /// Screen positions.
    screen: [Point2<f64>; 3],
    /// Reciprocal camera space depths.
    inv_depth: [f64; 3],
    /// Unit normals at the corners, oriented toward the camera.
    normals: [Vector3<f32>; 3],
    /// Material color.
    color: Color,
    /// Twice the signed screen area.
    area: f64,
    /// Inclusive pixel column range.
    columns: (usize, usize),
    /// Inclusive pixel row range.
    rows: (usize, usize),
}

/// Counters collected during triangle setup.
#[derive(Default, Debug, Clone, Copy)]
pub(super) struct SetupStats {
    /// Triangles queued for rasterization.
    pub(super) queued: usize,
    /// Triangles with a vertex at or behind the camera plane.
    pub(super) behind_camera: usize,
    /// Triangles entirely outside the image.
    pub(super) off_screen: usize,
    /// Triangles with zero screen area.
    pub(super) degenerate: usize,
}

/// Projects the faces of a model and appends the drawable ones.
pub(super) fn setup_model(
    index: usize,
    src: &Model,
    camera: &Camera,
    shading: Shading,
    triangles: &mut Vec<Triangle>,
    stats: &mut SetupStats,
) {
    let world = src.to_world_space();
    let faces = src.geometry().faces();
    let smooth_normals = match shading {
        Shading::Smooth => Some(model::vertex_normals(&world, faces)),
        Shading::Flat => None,
    };
    let color = src.material().color();
    let (width, height) = camera.resolution();
    let (width, height) = (f64::from(width), f64::from(height));

    for &[i0, i1, i2] in faces {
        let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
        let corners = [world[i0], world[i1], world[i2]];
        // Also rejects NaN depths.
        if corners.iter().any(|p| !(p.z > 0.0)) {
            stats.behind_camera += 1;
            continue;
        }

        let mut screen = [Point2::new(0.0, 0.0); 3];
        let mut inv_depth = [0.0; 3];
        for (k, &corner) in corners.iter().enumerate() {
            let q = camera.project(corner);
            screen[k] = Point2::new(f64::from(q.x), f64::from(q.y));
            inv_depth[k] = 1.0 / f64::from(q.z);
        }

        let area = edge(screen[0], screen[1], screen[2]);
        if area == 0.0 || !area.is_finite() {
            stats.degenerate += 1;
            continue;
        }

        let min_x = screen[0].x.min(screen[1].x).min(screen[2].x);
        let max_x = screen[0].x.max(screen[1].x).max(screen[2].x);
        let min_y = screen[0].y.min(screen[1].y).min(screen[2].y);
        let max_y = screen[0].y.max(screen[1].y).max(screen[2].y);
        if max_x < 0.0 || max_y < 0.0 || min_x >= width || min_y >= height {
            stats.off_screen += 1;
            continue;
        }
        let columns = (
            min_x.floor().max(0.0) as usize,
            max_x.ceil().min(width - 1.0) as usize,
        );
        let rows = (
            min_y.floor().max(0.0) as usize,
            max_y.ceil().min(height - 1.0) as usize,
        );

        let face_normal = model::face_normal(corners[0], corners[1], corners[2]);
        // The camera is at the origin, so a normal pointing along the vector
        // to a corner points away from the camera.
        let back_facing = face_normal.dot(corners[0].to_vec()) > 0.0;
        let mut normals = match &smooth_normals {
            Some(n) => [n[i0], n[i1], n[i2]],
            None => {
                let len = face_normal.magnitude();
                let unit = if len > 0.0 { face_normal / len } else { face_normal };
                [unit; 3]
            }
        };
        if back_facing {
            for n in &mut normals {
                *n = -*n;
            }
        }

        triangles.push(Triangle {
            model: index,
            screen,
            inv_depth,
            normals,
            color,
            area,
            columns,
            rows,
        });
        stats.queued += 1;
    }
}

/// Draws the triangles over the frame.
///
/// Rows are split into bands processed in parallel. Each band visits the
/// triangles in slice order, so the result equals a sequential pass.
pub(super) fn rasterize(triangles: &[Triangle], light: &Light, frame: &mut RgbImage) {
    let (width, height) = frame.dimensions();
    let (width, height) = (width as usize, height as usize);
    if width == 0 || height == 0 || triangles.is_empty() {
        return;
    }

    let mut depth = vec![f64::INFINITY; width * height];
    let mut owner = vec![NO_OWNER; width * height];
    let pixels: &mut [u8] = &mut *frame;

    pixels
        .par_chunks_mut(width * 3 * BAND_ROWS)
        .zip(depth.par_chunks_mut(width * BAND_ROWS))
        .zip(owner.par_chunks_mut(width * BAND_ROWS))
        .enumerate()
        .for_each(|(band, ((pixels, depth), owner))| {
            let mut target = Band {
                top: band * BAND_ROWS,
                width,
                pixels,
                depth,
                owner,
            };
            for triangle in triangles {
                target.draw(triangle, light);
            }
        });
}

/// Horizontal strip of the frame with its depth and owner buffers.
struct Band<'a> {
    /// First row of the band in the frame.
    top: usize,
    /// Frame width.
    width: usize,
    /// RGB bytes of the band.
    pixels: &'a mut [u8],
    /// Nearest depth per pixel.
    depth: &'a mut [f64],
    /// Model index that wrote each pixel.
    owner: &'a mut [usize],
}

impl Band<'_> {
    /// Draws the part of the triangle inside the band.
    fn draw(&mut self, tri: &Triangle, light: &Light) {
        let bottom = self.top + self.depth.len() / self.width;
        let first_row = tri.rows.0.max(self.top);
        let end_row = (tri.rows.1 + 1).min(bottom);
        let [s0, s1, s2] = tri.screen;

        for y in first_row..end_row {
            let py = y as f64 + 0.5;
            for x in tri.columns.0..=tri.columns.1 {
                let p = Point2::new(x as f64 + 0.5, py);
                let w0 = edge(s1, s2, p);
                let w1 = edge(s2, s0, p);
                let w2 = edge(s0, s1, p);
                let inside = if tri.area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }

                let bary = [w0 / tri.area, w1 / tri.area, w2 / tri.area];
                let inv_z = bary[0] * tri.inv_depth[0]
                    + bary[1] * tri.inv_depth[1]
                    + bary[2] * tri.inv_depth[2];
                let z = 1.0 / inv_z;

                let i = (y - self.top) * self.width + x;
                let nearer = z < self.depth[i];
                let later_tie =
                    z == self.depth[i] && self.owner[i] != NO_OWNER && tri.model > self.owner[i];
                if !(nearer || later_tie) {
                    continue;
                }
                self.depth[i] = z;
                self.owner[i] = tri.model;

                let factor = light.shading_factor(tri.normal_at(bary, z));
                let c = tri.color;
                let rgb = to_rgb8(Color::new(c.r * factor, c.g * factor, c.b * factor));
                self.pixels[i * 3..i * 3 + 3].copy_from_slice(&rgb.0);
            }
        }
    }
}

impl Triangle {
    /// Returns the perspective-correct interpolated unit normal.
    fn normal_at(&self, bary: [f64; 3], z: f64) -> Vector3<f32> {
        let n = (0..3).fold(Vector3::new(0.0, 0.0, 0.0), |acc, k| {
            let weight = (bary[k] * self.inv_depth[k] * z) as f32;
            acc + self.normals[k] * weight
        });
        let len = n.magnitude();
        if len > 0.0 {
            n / len
        } else {
            n
        }
    }
}

/// Returns twice the signed area of the triangle `(a, b, p)`.
fn edge(a: Point2<f64>, b: Point2<f64>, p: Point2<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
