use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{
    config::Naming,
    error::{MaskError, Result},
    raster::Mask,
};

/// Output file name for an asset. [`Naming::Substring`] swaps every "jpg"
/// in the name for "png", wherever it appears.
pub fn mask_file_name(asset_name: &str, naming: Naming) -> String {
    match naming {
        Naming::Substring => asset_name.replace("jpg", "png"),
        Naming::Extension => Path::new(asset_name)
            .with_extension("png")
            .to_string_lossy()
            .into_owned(),
    }
}

/// Saves `mask` as an 8-bit indexed PNG, replacing any file already at `path`.
pub fn write_mask(path: &Path, mask: &Mask) -> Result<()> {
    let encode_err = |source| MaskError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| MaskError::io(path, e))?;
    let mut encoder = Encoder::new(BufWriter::new(file), mask.width(), mask.height());
    encoder.set_color(ColorType::Indexed);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_palette(mask.palette_bytes());

    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(mask.pixels()).map_err(encode_err)?;
    writer.finish().map_err(encode_err)
}

/// Reads a mask written by [`write_mask`] back into label ids and palette.
pub fn read_mask(path: &Path) -> Result<Mask> {
    let decode_err = |source| MaskError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| MaskError::io(path, e))?;
    let mut decoder = Decoder::new(BufReader::new(file));
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(decode_err)?;

    let palette = reader
        .info()
        .palette
        .as_ref()
        .map(|plte| {
            plte.chunks_exact(3)
                .map(|rgb| [rgb[0], rgb[1], rgb[2]])
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(decode_err)?;
    if info.color_type != ColorType::Indexed || info.bit_depth != BitDepth::Eight {
        return Err(MaskError::NotAMask {
            path: path.to_path_buf(),
            found: format!("{:?} at {:?}", info.color_type, info.bit_depth),
        });
    }
    buf.truncate(info.buffer_size());

    Ok(Mask::from_parts(info.width, info.height, buf, palette))
}
