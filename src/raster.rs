use log::warn;

use crate::{
    annotation::{Point, Region, Size},
    color::Rgb,
    config::UnsupportedRegions,
    error::{MaskError, Result},
    palette::{LabelMap, BACKGROUND},
};

const POLYGON: &str = "POLYGON";

/// A single-channel label image with the palette it is displayed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    palette: Vec<Rgb>,
}

impl Mask {
    pub fn new(width: u32, height: u32, palette: Vec<Rgb>) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width as usize * height as usize],
            palette,
        }
    }

    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>, palette: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major label ids.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// The palette flattened to `r, g, b` triples, as a PLTE chunk wants it.
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette.iter().flatten().copied().collect()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    fn put(&mut self, x: i64, y: i64, value: u8) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.pixels[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Fills columns `ceil(from)..=floor(to)` of row `y`, clipped to the canvas.
    fn hline(&mut self, y: i64, from: f64, to: f64, value: u8) {
        if y < 0 || y >= self.height as i64 || self.width == 0 {
            return;
        }
        let last = (self.width - 1) as f64;
        let x0 = from.ceil().max(0.0);
        let x1 = to.floor().min(last);
        if x0 > x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x0 as usize..=row + x1 as usize].fill(value);
    }

    /// Draws the part of segment `a`-`b` that lies on the canvas.
    fn line(&mut self, a: (f64, f64), b: (f64, f64), value: u8) {
        let Some(((x0, y0), (x1, y1))) = self.clip(a, b) else {
            return;
        };
        let (x0, y0) = (x0.round() as i64, y0.round() as i64);
        let (x1, y1) = (x1.round() as i64, y1.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, value);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    // Liang-Barsky against the pixel-center box [0, w-1] x [0, h-1].
    fn clip(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (xmax, ymax) = ((self.width - 1) as f64, (self.height - 1) as f64);
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);

        for (p, q) in [(-dx, a.0), (dx, xmax - a.0), (-dy, a.1), (dy, ymax - a.1)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (a.0 + t0 * dx, a.1 + t0 * dy),
            (a.0 + t1 * dx, a.1 + t1 * dy),
        ))
    }

    /// Fills the polygon interior (even-odd) and its outline with `value`.
    /// Vertices snap to the nearest pixel; anything off-canvas is clipped, so
    /// the work is bounded by the canvas size rather than the coordinates.
    pub fn fill_polygon(&mut self, points: &[Point], value: u8) {
        let vertices: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p.x.round(), p.y.round()))
            .collect();
        if vertices.is_empty() || self.height == 0 {
            return;
        }

        let edges: Vec<((f64, f64), (f64, f64))> = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
            .collect();

        let (min_y, max_y) = vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.1), hi.max(v.1))
            });
        let top = min_y.max(0.0);
        let bottom = max_y.min((self.height - 1) as f64);
        if top > bottom {
            return;
        }

        let mut crossings = Vec::with_capacity(edges.len());
        for y in top as i64..=bottom as i64 {
            let fy = y as f64;
            crossings.clear();
            for &(a, b) in &edges {
                // Horizontal edges are covered by the outline.
                if a.1 == b.1 {
                    continue;
                }
                let (lo, hi) = if a.1 < b.1 { (a, b) } else { (b, a) };
                if fy < lo.1 || fy >= hi.1 {
                    continue;
                }
                let t = (fy - lo.1) / (hi.1 - lo.1);
                crossings.push(lo.0 + t * (hi.0 - lo.0));
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                self.hline(y, span[0], span[1], value);
            }
        }

        self.outline(&edges, value);
    }

    fn outline(&mut self, edges: &[((f64, f64), (f64, f64))], value: u8) {
        for &(a, b) in edges {
            self.line(a, b, value);
        }
    }
}

/// Paints every region of one asset onto a fresh background canvas, in
/// document order. Returns the mask and the number of regions skipped under
/// [`UnsupportedRegions::Warn`].
pub fn rasterize(
    asset: &str,
    size: Size,
    regions: &[Region],
    labels: &LabelMap,
    on_unsupported: UnsupportedRegions,
) -> Result<(Mask, usize)> {
    let mut mask = Mask::new(size.width, size.height, labels.colors().to_vec());
    let mut skipped = 0;

    for (index, region) in regions.iter().enumerate() {
        let label = region.tags.first().ok_or_else(|| MaskError::MissingTag {
            asset: asset.to_string(),
            index,
        })?;
        let label_id = labels.id(label).ok_or_else(|| MaskError::UnknownLabel {
            asset: asset.to_string(),
            label: label.clone(),
        })?;

        let unsupported = if region.kind != POLYGON {
            Some(MaskError::UnsupportedRegion {
                asset: asset.to_string(),
                index,
                kind: region.kind.clone(),
            })
        } else if region.points.len() < 3 {
            Some(MaskError::InsufficientPoints {
                asset: asset.to_string(),
                index,
                count: region.points.len(),
            })
        } else {
            None
        };

        match (unsupported, on_unsupported) {
            (None, _) => mask.fill_polygon(&region.points, label_id),
            (Some(err), UnsupportedRegions::Fail) => return Err(err),
            (Some(err), UnsupportedRegions::Warn) => {
                warn!("skipping region: {}", err);
                skipped += 1;
            }
        }
    }

    Ok((mask, skipped))
}
