use serde::{Deserialize, Deserializer};
use serde_with::{serde_as, Map};
use std::{fs::File, io::BufReader, path::Path};

use crate::error::{MaskError, Result};

/// A VoTT JSON export: the declared tags plus every annotated asset.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct AnnotationDocument {
    pub tags: Vec<Tag>,
    /// Keyed by asset id in the file; kept in document order.
    #[serde_as(as = "Map<_, _>")]
    pub assets: Vec<(String, ImageAnnotation)>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

#[derive(Deserialize, Debug)]
pub struct ImageAnnotation {
    pub asset: Asset,
    pub regions: Vec<Region>,
}

#[derive(Deserialize, Debug)]
pub struct Asset {
    pub name: String,
    pub size: Size,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    #[serde(deserialize_with = "dimension")]
    pub width: u32,
    #[serde(deserialize_with = "dimension")]
    pub height: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Region {
    pub points: Vec<Point>,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

// VoTT writes sizes as plain numbers, occasionally with a fractional part.
fn dimension<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "invalid image dimension {}",
            value
        )));
    }
    Ok(value.trunc() as u32)
}

pub fn load_annotations(path: &Path) -> Result<AnnotationDocument> {
    let file = File::open(path).map_err(|e| MaskError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| MaskError::Json {
        path: path.to_path_buf(),
        source,
    })
}
