use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Converts a VoTT JSON export into palettized PNG label masks.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// VoTT generated annotation file to produce mask images from
    pub annotation_file: PathBuf,

    /// Directory to save mask images to
    pub mask_dir: PathBuf,

    /// How mask file names are derived from asset names
    #[arg(long, value_enum, default_value = "substring")]
    pub naming: Naming,

    /// What to do with regions that cannot be rasterized
    #[arg(long = "on-unsupported", value_enum, default_value = "fail")]
    pub on_unsupported: UnsupportedRegions,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum Naming {
    /// Replace every "jpg" in the name with "png"
    #[default]
    Substring,
    /// Replace the file extension with "png"
    Extension,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum UnsupportedRegions {
    /// Abort the run
    #[default]
    Fail,
    /// Log a warning and leave the region unpainted
    Warn,
}
