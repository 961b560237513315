//! Wavefront OBJ loader.
//!
//! Only vertex positions (`v`) and faces (`f`) are read; every other record
//! is skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, Context};
use cgmath::Point3;
use log::{debug, trace};

use crate::{data::GeometryMesh, source::triangulator::triangulate};

/// Loads an OBJ file.
pub fn load(path: impl AsRef<Path>) -> anyhow::Result<GeometryMesh> {
    load_impl(path.as_ref())
}

/// Loads an OBJ file.
fn load_impl(path: &Path) -> anyhow::Result<GeometryMesh> {
    debug!("Loading OBJ mesh: path={}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open OBJ file {}", path.display()))?;
    let mesh = parse(BufReader::new(file))
        .with_context(|| format!("Failed to parse OBJ file {}", path.display()))?;
    debug!(
        "Successfully loaded OBJ mesh: path={}, vertices={}, faces={}",
        path.display(),
        mesh.positions().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parses OBJ data.
pub fn parse(reader: impl BufRead) -> anyhow::Result<GeometryMesh> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();
    let mut polygon = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line_num = line_index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_num))?;
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => &line[..],
        };
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let position = parse_position(fields)
                    .with_context(|| format!("Invalid vertex at line {}", line_num))?;
                positions.push(position);
            }
            Some("f") => {
                polygon.clear();
                for field in fields {
                    let index = parse_index(field, positions.len())
                        .with_context(|| format!("Invalid face at line {}", line_num))?;
                    polygon.push(index);
                }
                triangulate(&positions, &polygon, &mut faces)
                    .with_context(|| format!("Invalid face at line {}", line_num))?;
            }
            Some(keyword) => trace!("Skipping OBJ record {:?} at line {}", keyword, line_num),
            None => {}
        }
    }

    Ok(GeometryMesh::new(positions, faces))
}

/// Parses the coordinates of a `v` record.
///
/// An optional fourth (`w`) component is ignored.
fn parse_position<'a>(mut fields: impl Iterator<Item = &'a str>) -> anyhow::Result<Point3<f32>> {
    let mut coord = || -> anyhow::Result<f32> {
        let field = fields
            .next()
            .ok_or_else(|| anyhow!("Expected three coordinates"))?;
        field
            .parse::<f32>()
            .with_context(|| format!("Invalid coordinate {:?}", field))
    };
    let x = coord()?;
    let y = coord()?;
    let z = coord()?;
    Ok(Point3::new(x, y, z))
}

/// Parses a face corner (`v`, `v/vt`, `v/vt/vn` or `v//vn`) into a 0-based
/// vertex index.
///
/// Negative indices count back from the latest vertex.
fn parse_index(field: &str, vertex_count: usize) -> anyhow::Result<u32> {
    let raw = field.split('/').next().unwrap_or(field);
    let index: i64 = raw
        .parse()
        .with_context(|| format!("Invalid vertex index {:?}", field))?;
    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        vertex_count as i64 + index
    } else {
        bail!("Vertex index must not be zero");
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        bail!(
            "Vertex index {} out of range: vertices={}",
            index,
            vertex_count
        );
    }
    Ok(resolved as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_triangles_and_quads() {
        let src = "\
# cube corner
o piece
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0 1.0
vt 0 0
vn 0 0 1
f 1 2 3
f 1/1 3/1 4/1   # textured
f -4//1 -3//1 -2//1 -1//1
";
        let mesh = parse(src.as_bytes()).expect("valid OBJ");
        assert_eq!(mesh.positions().len(), 4);
        assert_eq!(mesh.positions()[3], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(
            mesh.faces(),
            &[[0, 1, 2], [0, 2, 3], [0, 1, 2], [0, 2, 3]]
        );
    }

    #[test]
    fn reject_out_of_range_index() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n";
        assert!(parse(src.as_bytes()).is_err());
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(parse(src.as_bytes()).is_err());
    }

    #[test]
    fn reject_bad_vertex() {
        assert!(parse("v 0 zero 0\n".as_bytes()).is_err());
        assert!(parse("v 0 0\n".as_bytes()).is_err());
    }

    #[test]
    fn index_forms() {
        assert_eq!(parse_index("3", 5).expect("valid"), 2);
        assert_eq!(parse_index("3/7/1", 5).expect("valid"), 2);
        assert_eq!(parse_index("-1//2", 5).expect("valid"), 4);
        assert!(parse_index("-6", 5).is_err());
        assert!(parse_index("x", 5).is_err());
    }
}
