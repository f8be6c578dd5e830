//! Converts VoTT polygon annotation exports into palettized PNG label masks.
//!
//! Every declared tag gets a label id by position (starting at 1, with 0 left
//! for background) and a palette entry from its color. Each asset's polygon
//! regions are filled with their label id on a canvas of the declared size.

pub mod annotation;
pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod palette;
pub mod raster;
pub mod writer;

pub use annotation::{load_annotations, AnnotationDocument, ImageAnnotation, Region};
pub use config::{Args, Naming, UnsupportedRegions};
pub use convert::{vott_to_masks, ConversionSummary, ConvertOptions};
pub use error::MaskError;
pub use palette::LabelMap;
pub use raster::{rasterize, Mask};
pub use writer::{mask_file_name, read_mask, write_mask};
