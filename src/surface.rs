use image::imageops::FilterType;

use crate::model::{Color, LogicalPoint, ToolState};
use crate::render::{self, PixelBuffer};

/// Where a seed image lands on the surface, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Aspect-preserving fit of a source raster into the target box: a source
/// wider than the target aspect takes the full width and centers vertically,
/// anything else takes the full height and centers horizontally.
pub fn fit_seed_rect(
    source_width: u32,
    source_height: u32,
    target_width: f32,
    target_height: f32,
) -> FitRect {
    let source_aspect = source_width as f32 / source_height as f32;
    let target_aspect = target_width / target_height;

    if source_aspect > target_aspect {
        let height = target_width / source_aspect;
        FitRect {
            x: 0.0,
            y: (target_height - height) / 2.0,
            width: target_width,
            height,
        }
    } else {
        let width = target_height * source_aspect;
        FitRect {
            x: (target_width - width) / 2.0,
            y: 0.0,
            width,
            height: target_height,
        }
    }
}

/// Handed out before an asynchronous seed decode and presented back with the
/// decoded bytes; a reinitialization in between invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied,
    Stale,
    Undecodable,
}

/// The backing raster store. Owns the RGBA buffer at physical resolution
/// (logical size x density ratio) and is the single place where logical
/// coordinates become pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    logical_width: f32,
    logical_height: f32,
    pixel_ratio: f32,
    background: Color,
    buffer: PixelBuffer,
    has_content: bool,
    generation: u64,
}

impl Surface {
    pub fn new(logical_width: f32, logical_height: f32, pixel_ratio: f32, background: Color) -> Self {
        let buffer = PixelBuffer::new(
            physical_extent(logical_width, pixel_ratio),
            physical_extent(logical_height, pixel_ratio),
            background,
        );
        Self {
            logical_width,
            logical_height,
            pixel_ratio,
            background,
            buffer,
            has_content: false,
            generation: 0,
        }
    }

    /// Replace the backing store for a new logical size and/or density ratio.
    /// Always allocates fresh pixels; the previous store is dropped whole, so
    /// nothing from the old size can bleed through.
    pub fn reinitialize(&mut self, logical_width: f32, logical_height: f32, pixel_ratio: f32) {
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.pixel_ratio = pixel_ratio;
        self.buffer = PixelBuffer::new(
            physical_extent(logical_width, pixel_ratio),
            physical_extent(logical_height, pixel_ratio),
            self.background,
        );
        self.has_content = false;
        self.generation += 1;
        tracing::debug!(
            logical_width,
            logical_height,
            pixel_ratio,
            "surface reinitialized"
        );
    }

    /// Refill with the background color. Safe to call repeatedly; the pixel
    /// state after any number of calls is identical.
    pub fn clear(&mut self) {
        self.buffer.fill(self.background);
        self.has_content = false;
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn physical_size(&self) -> (u32, u32) {
        (self.buffer.width, self.buffer.height)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Render the zero-length-stroke dot: a filled circle of radius width/2.
    pub fn stamp_dot(&mut self, point: LogicalPoint, tool: &ToolState) {
        let center = self.to_physical(point);
        let radius = self.brush_radius(tool.width);
        render::stamp_brush(&mut self.buffer, center, radius, tool.color);
        self.has_content = true;
    }

    /// Render one stroke segment with round caps and joins.
    pub fn stroke_segment(&mut self, from: LogicalPoint, to: LogicalPoint, tool: &ToolState) {
        let start = self.to_physical(from);
        let end = self.to_physical(to);
        let radius = self.brush_radius(tool.width);
        render::draw_segment(&mut self.buffer, start, end, radius, tool.color);
        self.has_content = true;
    }

    pub fn seed_ticket(&self) -> SeedTicket {
        SeedTicket {
            generation: self.generation,
        }
    }

    /// Complete a seed load: decode, clear to background, draw the source
    /// letterboxed and centered, mark the surface non-empty.
    ///
    /// A ticket from before a reinitialization is rejected without touching
    /// the store. Undecodable bytes leave the surface exactly as it was;
    /// neither case is an error the caller needs to handle.
    pub fn apply_seed(&mut self, ticket: SeedTicket, data: &[u8]) -> SeedOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                current = self.generation,
                ticket = ticket.generation,
                "seed decode finished after reinitialization; discarded"
            );
            return SeedOutcome::Stale;
        }

        let decoded = match image::load_from_memory(data) {
            Ok(image) => image.to_rgba8(),
            Err(err) => {
                tracing::warn!(error = %err, "seed image decode failed; surface left unchanged");
                return SeedOutcome::Undecodable;
            }
        };

        self.buffer.fill(self.background);

        let (source_width, source_height) = decoded.dimensions();
        let fit = fit_seed_rect(
            source_width,
            source_height,
            self.logical_width,
            self.logical_height,
        );
        let dest_width = ((fit.width * self.pixel_ratio).round() as u32).max(1);
        let dest_height = ((fit.height * self.pixel_ratio).round() as u32).max(1);
        let dest_x = (fit.x * self.pixel_ratio).round() as i64;
        let dest_y = (fit.y * self.pixel_ratio).round() as i64;

        let scaled = if (source_width, source_height) == (dest_width, dest_height) {
            decoded
        } else {
            image::imageops::resize(&decoded, dest_width, dest_height, FilterType::Triangle)
        };

        let buffer_width = self.buffer.width as i64;
        let buffer_height = self.buffer.height as i64;
        let source = scaled.as_raw();
        for sy in 0..dest_height as i64 {
            let ty = dest_y + sy;
            if ty < 0 || ty >= buffer_height {
                continue;
            }
            for sx in 0..dest_width as i64 {
                let tx = dest_x + sx;
                if tx < 0 || tx >= buffer_width {
                    continue;
                }
                let src_idx = ((sy * dest_width as i64 + sx) * 4) as usize;
                let dst_idx = ((ty * buffer_width + tx) * 4) as usize;
                let top = Color::from_rgba_array([
                    source[src_idx],
                    source[src_idx + 1],
                    source[src_idx + 2],
                    source[src_idx + 3],
                ]);
                let bottom = Color::from_rgba_array([
                    self.buffer.pixels[dst_idx],
                    self.buffer.pixels[dst_idx + 1],
                    self.buffer.pixels[dst_idx + 2],
                    self.buffer.pixels[dst_idx + 3],
                ]);
                let blended = blend_pixel(bottom, top);
                self.buffer.pixels[dst_idx..dst_idx + 4].copy_from_slice(&blended.to_rgba_array());
            }
        }

        self.has_content = true;
        tracing::debug!(source_width, source_height, "seed image applied");
        SeedOutcome::Applied
    }

    fn to_physical(&self, point: LogicalPoint) -> (i32, i32) {
        (
            (point.x * self.pixel_ratio).round() as i32,
            (point.y * self.pixel_ratio).round() as i32,
        )
    }

    fn brush_radius(&self, stroke_width: f32) -> f32 {
        stroke_width * self.pixel_ratio / 2.0
    }
}

fn physical_extent(logical: f32, ratio: f32) -> u32 {
    ((logical * ratio).round() as u32).max(1)
}

/// Source-over blend of one seed pixel onto the surface.
fn blend_pixel(bottom: Color, top: Color) -> Color {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::rgba(0, 0, 0, 0);
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}
