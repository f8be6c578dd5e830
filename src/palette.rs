use std::collections::HashMap;

use crate::{
    annotation::Tag,
    color::{parse_rgb, Rgb},
    error::{MaskError, Result},
};

/// Index 0 of every mask is background.
pub const BACKGROUND: u8 = 0;

/// Label ids by tag name, and the color table they index into.
#[derive(Debug, Clone)]
pub struct LabelMap {
    ids: HashMap<String, u8>,
    colors: Vec<Rgb>,
}

impl LabelMap {
    /// Tag `i` gets id `i + 1`. A repeated name keeps the id of its last
    /// occurrence, but every tag still occupies its own palette slot.
    pub fn from_tags(tags: &[Tag]) -> Result<Self> {
        if tags.len() > u8::MAX as usize {
            return Err(MaskError::TooManyLabels { count: tags.len() });
        }

        let mut ids = HashMap::with_capacity(tags.len());
        let mut colors = Vec::with_capacity(tags.len() + 1);
        colors.push([0, 0, 0]);

        for (i, tag) in tags.iter().enumerate() {
            let color = parse_rgb(&tag.color).ok_or_else(|| MaskError::InvalidColor {
                tag: tag.name.clone(),
                color: tag.color.clone(),
            })?;
            colors.push(color);
            ids.insert(tag.name.clone(), (i + 1) as u8);
        }

        Ok(Self { ids, colors })
    }

    pub fn id(&self, name: &str) -> Option<u8> {
        self.ids.get(name).copied()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}
