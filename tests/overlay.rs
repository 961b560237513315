//! Load annotations and meshes from disk, then render them over a photo.

use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{Rgb, RgbImage};
use pose_overlay::{
    data::{Color, ColorPalette, Light, Material, Model},
    source::{find_annotation, GeometrySource, HandGeometry, ObjFile, PosedHandMesh},
    Error, Renderer,
};

const SIZE: u32 = 64;

const ANNOTATIONS: &str = r#"[
    {
        "image_id": "clip",
        "R": [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
        "t": [0.0, 0.0, 2.0],
        "s": 1.0,
        "hand_pose": [0.0, 0.0, 0.0],
        "trans": [0.0, 0.0, 0.5],
        "hand_R": [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
        "hand_t": [0.0, 0.0, 1.0],
        "hand_s": 1.0
    }
]"#;

/// Temporary directory removed on drop.
struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "pose-overlay-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("temporary directory");
        Self { dir }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        fs::write(&path, contents).expect("fixture file");
        path
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn square_obj(center: [f32; 3], half: f32) -> String {
    let [x, y, z] = center;
    format!(
        "v {} {} {}\nv {} {} {}\nv {} {} {}\nv {} {} {}\nf 1 2 3 4\n",
        x - half,
        y - half,
        z,
        x + half,
        y - half,
        z,
        x + half,
        y + half,
        z,
        x - half,
        y + half,
        z
    )
}

fn rgb8(color: Color) -> Rgb<u8> {
    let c = |v: f32| (v * 255.0).round() as u8;
    Rgb([c(color.r), c(color.g), c(color.b)])
}

fn load_models(fixture: &Fixture, palette: &ColorPalette) -> (Model, Model) {
    let annotations = fixture.write("poses.json", ANNOTATIONS);
    // Off-center on purpose: centering must move it back onto the axis.
    let object_path = fixture.write("object.obj", &square_obj([3.0, -1.0, 7.0], 0.5));
    let hand_path = fixture.write("hand.obj", &square_obj([0.0, 0.0, 0.0], 0.25));

    let anno = find_annotation(&annotations, "clip").expect("annotation");
    let object = Model::new(
        ObjFile::new(&object_path)
            .load_geometry()
            .expect("object mesh")
            .centered(true),
        anno.object_transform().expect("object pose"),
        Material::from_palette(palette, "red").expect("red"),
    )
    .expect("object model");

    let hand_model = PosedHandMesh::load(&hand_path).expect("hand mesh");
    let params = anno.hand_params();
    let hand = Model::new(
        HandGeometry::new(&hand_model, &params)
            .load_geometry()
            .expect("hand geometry"),
        anno.hand_transform().expect("hand pose"),
        Material::from_palette(palette, "blue").expect("blue"),
    )
    .expect("hand model");

    (object, hand)
}

fn unlit_renderer() -> Renderer {
    let mut renderer = Renderer::new(SIZE, SIZE);
    renderer.set_light(Light::new([1.0, 0.5, 1.0], 0.0, 1.0).expect("non-zero direction"));
    renderer
}

#[test]
fn hand_occludes_object_over_photo() {
    let fixture = Fixture::new("occlusion");
    let palette = ColorPalette::default();
    let (object, hand) = load_models(&fixture, &palette);
    let photo = RgbImage::from_pixel(SIZE, SIZE, Rgb([10, 20, 30]));
    let red = rgb8(palette.resolve("red").expect("red"));
    let blue = rgb8(palette.resolve("blue").expect("blue"));

    // Object at depth 2 covers 16..48; hand at depth 1.5 covers about 21..43.
    for models in &[[&object, &hand], [&hand, &object]] {
        let frame = unlit_renderer()
            .render(models.iter().cloned(), Some(&photo))
            .expect("render");
        assert_eq!(*frame.get_pixel(32, 32), blue);
        assert_eq!(*frame.get_pixel(18, 32), red);
        assert_eq!(*frame.get_pixel(2, 2), Rgb([10, 20, 30]));
        assert_eq!(*frame.get_pixel(60, 50), Rgb([10, 20, 30]));
    }
}

#[test]
fn photo_size_must_match() {
    let fixture = Fixture::new("mismatch");
    let palette = ColorPalette::default();
    let (object, hand) = load_models(&fixture, &palette);
    let photo = RgbImage::new(SIZE * 2, SIZE);

    let result = unlit_renderer().render(vec![&object, &hand], Some(&photo));
    assert_eq!(
        result,
        Err(Error::ResolutionMismatch {
            expected: (SIZE, SIZE),
            actual: (SIZE * 2, SIZE),
        })
    );
}

#[test]
fn missing_files_are_reported() {
    let missing = Path::new("/nonexistent/pose-overlay/poses.json");
    let err = find_annotation(missing, "clip").unwrap_err();
    assert!(format!("{:#}", err).contains("poses.json"));

    let err = ObjFile::new("/nonexistent/pose-overlay/object.obj")
        .load_geometry()
        .unwrap_err();
    assert!(format!("{:#}", err).contains("object.obj"));
}
