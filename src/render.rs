use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::Color;

/// Owned RGBA8 raster at backing-store resolution. Coordinates here are
/// physical pixels; callers are expected to have applied the density scale
/// already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let mut buffer = Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        };
        buffer.fill(fill);
        buffer
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn fill(&mut self, color: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk[0] = color.r;
            chunk[1] = color.g;
            chunk[2] = color.b;
            chunk[3] = color.a;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = ((y * self.width + x) * 4) as usize;
        Color {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }
}

/// Precomputed circular footprint: per-row dx spans for a given radius.
#[derive(Clone)]
struct BrushMask {
    rows: Vec<BrushMaskRow>,
}

#[derive(Clone)]
struct BrushMaskRow {
    dy: i32,
    min_dx: i32,
    max_dx: i32,
}

// Masks are keyed by radius in tenths of a pixel so fractional radii
// (width x density ratio / 2) get their own footprint.
static BRUSH_MASKS: Lazy<Mutex<HashMap<u32, BrushMask>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn mask_key(radius: f32) -> u32 {
    (radius.max(0.0) * 10.0).round() as u32
}

fn get_brush_mask(key: u32) -> BrushMask {
    if let Ok(guard) = BRUSH_MASKS.lock() {
        if let Some(mask) = guard.get(&key) {
            return mask.clone();
        }
    }

    let radius = key as f32 / 10.0;
    let radius_sq = radius * radius;
    let reach = radius.floor() as i32;
    let mut rows = Vec::with_capacity((reach * 2 + 1) as usize);
    for dy in -reach..=reach {
        let mut max_dx = reach;
        while max_dx >= 0 && (max_dx * max_dx + dy * dy) as f32 > radius_sq {
            max_dx -= 1;
        }
        if max_dx >= 0 {
            rows.push(BrushMaskRow {
                dy,
                min_dx: -max_dx,
                max_dx,
            });
        }
    }
    let mask = BrushMask { rows };
    if let Ok(mut guard) = BRUSH_MASKS.lock() {
        let _ = guard.insert(key, mask.clone());
    }
    mask
}

/// Fill a disc of the given radius centered on a physical pixel. Pixels
/// falling outside the buffer are skipped.
pub fn stamp_brush(buffer: &mut PixelBuffer, center: (i32, i32), radius: f32, color: Color) {
    let mask = get_brush_mask(mask_key(radius));
    let width = buffer.width as i32;
    let height = buffer.height as i32;

    for row in &mask.rows {
        let y = center.1 + row.dy;
        if y < 0 || y >= height {
            continue;
        }
        let x0 = (center.0 + row.min_dx).max(0);
        let x1 = (center.0 + row.max_dx).min(width - 1);
        if x0 > x1 {
            continue;
        }
        let row_base = (y as usize) * (buffer.width as usize) * 4;
        for x in x0..=x1 {
            let idx = row_base + (x as usize) * 4;
            buffer.pixels[idx] = color.r;
            buffer.pixels[idx + 1] = color.g;
            buffer.pixels[idx + 2] = color.b;
            buffer.pixels[idx + 3] = color.a;
        }
    }
}

/// Draw a solid segment by walking the line and stamping the brush at every
/// step. Overlapping stamps at shared endpoints give round caps and joins,
/// so consecutive segments read as one continuous stroke.
pub fn draw_segment(
    buffer: &mut PixelBuffer,
    start: (i32, i32),
    end: (i32, i32),
    radius: f32,
    color: Color,
) {
    let (mut x0, mut y0) = start;
    let (x1, y1) = end;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp_brush(buffer, (x0, y0), radius, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
