//! Pose overlay renderer.
//!
//! Renders posed object and hand meshes with a perspective camera and a
//! directional light, and composites them over the photograph the poses were
//! estimated from.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub use self::{
    camera::Camera,
    cli_opt::CliOpt,
    error::{Error, Result},
    render::{Renderer, Shading},
};

pub mod camera;
mod cli_opt;
pub mod data;
mod error;
pub mod render;
pub mod source;
pub mod util;
