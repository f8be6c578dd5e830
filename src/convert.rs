use log::{debug, info};
use std::{fs::create_dir_all, path::Path};

use crate::{
    annotation::load_annotations,
    config::{Args, Naming, UnsupportedRegions},
    error::{MaskError, Result},
    palette::LabelMap,
    raster::rasterize,
    writer::{mask_file_name, write_mask},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub naming: Naming,
    pub on_unsupported: UnsupportedRegions,
}

impl From<&Args> for ConvertOptions {
    fn from(args: &Args) -> Self {
        Self {
            naming: args.naming,
            on_unsupported: args.on_unsupported,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub masks_written: usize,
    pub regions_skipped: usize,
}

/// Converts a VoTT JSON export into one palettized mask per asset.
///
/// Assets are processed in document order and the first failure aborts the
/// run; masks written before it stay on disk.
pub fn vott_to_masks(
    annotation_file: &Path,
    mask_dir: &Path,
    options: ConvertOptions,
) -> Result<ConversionSummary> {
    create_dir_all(mask_dir).map_err(|e| MaskError::io(mask_dir, e))?;

    let document = load_annotations(annotation_file)?;
    let labels = LabelMap::from_tags(&document.tags)?;
    info!(
        "Loaded {} tags and {} assets from {:?}",
        document.tags.len(),
        document.assets.len(),
        annotation_file
    );

    let mut summary = ConversionSummary::default();
    for (id, image) in &document.assets {
        let name = &image.asset.name;
        let (mask, skipped) = rasterize(
            name,
            image.asset.size,
            &image.regions,
            &labels,
            options.on_unsupported,
        )?;

        let mask_path = mask_dir.join(mask_file_name(name, options.naming));
        write_mask(&mask_path, &mask)?;
        debug!(
            "Asset {} ({}): {} regions -> {:?}",
            id,
            name,
            image.regions.len(),
            mask_path
        );

        summary.masks_written += 1;
        summary.regions_skipped += skipped;
    }

    info!(
        "Wrote {} masks to {:?} ({} regions skipped)",
        summary.masks_written, mask_dir, summary.regions_skipped
    );
    Ok(summary)
}
