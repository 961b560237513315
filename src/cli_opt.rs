//! CLI options.

use std::path::PathBuf;

use clap::Parser;

/// CLI options.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct CliOpt {
    /// Dataset directory containing `models/` and `images/`
    #[arg(long, default_value = ".")]
    pub dataset_dir: PathBuf,
    /// Clip to show (`image_id` entry of the annotations)
    #[arg(long, default_value = "board_food_v_LUS1jeTGc68_frame000082")]
    pub clip: String,
    /// Annotation file
    #[arg(long, default_value = "poses.json")]
    pub annotations: PathBuf,
    /// Posed hand mesh (OBJ) produced by the hand model
    #[arg(long)]
    pub hand_mesh: PathBuf,
    /// Directory to store the visualization in
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Skip interactive display
    #[arg(long)]
    pub offscreen: bool,
    /// Object material color
    #[arg(long, default_value = "red")]
    pub object_color: String,
    /// Hand material color
    #[arg(long, default_value = "blue")]
    pub hand_color: String,
}

impl CliOpt {
    /// Returns the object mesh path of the clip.
    pub fn object_mesh_path(&self) -> PathBuf {
        self.dataset_dir
            .join("models")
            .join(format!("{}.obj", self.clip))
    }

    /// Returns the photograph path of the clip.
    pub fn image_path(&self) -> PathBuf {
        self.dataset_dir
            .join("images")
            .join(format!("{}.jpg", self.clip))
    }
}
