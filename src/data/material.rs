//! Material.

use crate::error::{Error, Result};

/// Linear RGB color with components in `[0, 1]`.
pub type Color = rgb::RGB<f32>;

/// Named material colors.
///
/// Lookup never falls back to a default: an unknown name is an error.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    /// Name and color pairs.
    colors: Vec<(String, Color)>,
}

impl ColorPalette {
    /// Creates an empty palette.
    pub fn empty() -> Self {
        Self { colors: Vec::new() }
    }

    /// Returns the palette with the given color registered.
    ///
    /// A color already registered under the same name is replaced.
    pub fn with_color(mut self, name: impl Into<String>, color: Color) -> Self {
        let name = name.into();
        match self.colors.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = color,
            None => self.colors.push((name, color)),
        }
        self
    }

    /// Returns the color registered under the given name.
    pub fn resolve(&self, name: &str) -> Result<Color> {
        self.colors
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, color)| color)
            .ok_or_else(|| Error::UnknownColor {
                name: name.to_owned(),
            })
    }

    /// Returns an iterator of the registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for ColorPalette {
    /// Returns the built-in palette.
    fn default() -> Self {
        Self::empty()
            .with_color("red", Color::new(251.0 / 255.0, 128.0 / 255.0, 114.0 / 255.0))
            .with_color("blue", Color::new(0.650_980_4, 0.741_176_5, 0.858_823_5))
            .with_color("white", Color::new(1.0, 1.0, 1.0))
            .with_color("green", Color::new(0.552_941_2, 0.827_451, 0.780_392_2))
            .with_color("yellow", Color::new(1.0, 1.0, 0.701_960_8))
            .with_color("gray", Color::new(0.6, 0.6, 0.6))
    }
}

/// Material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name, if the color came from a palette.
    pub(crate) name: Option<String>,
    /// Diffuse color.
    pub(crate) color: Color,
}

impl Material {
    /// Creates a material from a palette entry.
    pub fn from_palette(palette: &ColorPalette, name: &str) -> Result<Self> {
        Ok(Self {
            name: Some(name.to_owned()),
            color: palette.resolve(name)?,
        })
    }

    /// Creates a material with an explicit color.
    pub fn from_color(color: Color) -> Self {
        Self { name: None, color }
    }

    /// Returns the material name if available.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(AsRef::as_ref)
    }

    /// Returns the diffuse color.
    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_builtin() {
        let palette = ColorPalette::default();
        let red = palette.resolve("red").expect("red is built in");
        assert_eq!(red, Color::new(251.0 / 255.0, 128.0 / 255.0, 114.0 / 255.0));
        assert!(palette.resolve("blue").is_ok());
    }

    #[test]
    fn resolve_unknown() {
        let palette = ColorPalette::default();
        let before = palette.names().count();
        assert_eq!(
            palette.resolve("magenta"),
            Err(Error::UnknownColor {
                name: "magenta".to_owned()
            })
        );
        assert_eq!(palette.names().count(), before);
    }

    #[test]
    fn custom_color_replaces() {
        let palette = ColorPalette::default().with_color("red", Color::new(1.0, 0.0, 0.0));
        assert_eq!(palette.resolve("red"), Ok(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(palette.names().filter(|&n| n == "red").count(), 1);
    }

    #[test]
    fn material_from_palette() {
        let palette = ColorPalette::empty().with_color("teal", Color::new(0.0, 0.5, 0.5));
        let material = Material::from_palette(&palette, "teal").expect("teal is registered");
        assert_eq!(material.name(), Some("teal"));
        assert_eq!(material.color(), Color::new(0.0, 0.5, 0.5));
        assert!(Material::from_palette(&palette, "red").is_err());
    }
}
