use crate::capture::model::{Color, Compositing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub fn from_points(a: (i32, i32), b: (i32, i32), pad: i32) -> Self {
        let min_x = a.0.min(b.0).saturating_sub(pad);
        let max_x = a.0.max(b.0).saturating_add(pad);
        let min_y = a.1.min(b.1).saturating_sub(pad);
        let max_y = a.1.max(b.1).saturating_add(pad);
        Self {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).saturating_add(1).max(1),
            height: max_y.saturating_sub(min_y).saturating_add(1).max(1),
        }
    }

    pub fn full(width: u32, height: u32) -> Option<Self> {
        Self {
            x: 0,
            y: 0,
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
        .clamp(width, height)
    }

    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        DirtyRect {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).max(1),
            height: max_y.saturating_sub(min_y).max(1),
        }
    }

    fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<DirtyRect> {
        let max_w = i32::try_from(width).unwrap_or(i32::MAX);
        let max_h = i32::try_from(height).unwrap_or(i32::MAX);
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.right().clamp(0, max_w);
        let y1 = self.bottom().clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(DirtyRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaBuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        let mut buffer = Self {
            width,
            height,
            pixels: vec![0u8; len],
        };
        buffer.fill(fill);
        buffer
    }

    /// Wraps raw RGBA bytes; `None` when the length does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some(Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: Color, compositing: Compositing) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let dst = Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        );
        let out = match compositing {
            Compositing::SourceOver => blend_pixel(dst, color),
            Compositing::DestinationOut => erase_pixel(dst, color.a),
        };
        self.pixels[idx..idx + 4].copy_from_slice(&out.to_rgba_array());
    }

    /// Count of pixels that differ from `background`.
    pub fn count_differing(&self, background: Color) -> usize {
        let bg = background.to_rgba_array();
        self.pixels.chunks_exact(4).filter(|px| *px != bg).count()
    }
}

pub fn segment_dirty_bounds(start: (i32, i32), end: (i32, i32), stroke_width: u32) -> DirtyRect {
    let radius = stroke_width.max(1) as i32;
    DirtyRect::from_points(start, end, radius + 2)
}

/// Stamps a round brush along the segment. Returns the touched region, if any.
pub fn draw_segment(
    buffer: &mut RgbaBuffer,
    start: (i32, i32),
    end: (i32, i32),
    color: Color,
    stroke_width: u32,
    compositing: Compositing,
) -> Option<DirtyRect> {
    if buffer.width == 0 || buffer.height == 0 {
        return None;
    }
    let dirty = segment_dirty_bounds(start, end, stroke_width).clamp(buffer.width, buffer.height);

    let mut x0 = start.0;
    let mut y0 = start.1;
    let (x1, y1) = end;
    let dx = (i64::from(x1) - i64::from(x0)).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(i64::from(y1) - i64::from(y0)).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        draw_brush(buffer, (x0, y0), color, stroke_width, compositing);
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
    dirty
}

/// Maps a segment given in buffer space onto integer pixels, clipped to the
/// area a brush of `stroke_width` can still reach. Off-surface stretches are
/// cut away so the rasterizer never walks them. `None` when nothing of the
/// segment can touch the buffer or a coordinate is not finite.
pub fn clip_segment(
    buffer: &RgbaBuffer,
    start: (f32, f32),
    end: (f32, f32),
    stroke_width: u32,
) -> Option<((i32, i32), (i32, i32))> {
    let finite = |p: (f32, f32)| p.0.is_finite() && p.1.is_finite();
    if !finite(start) || !finite(end) {
        return None;
    }
    let reach = (stroke_width / 2 + 1) as f32;
    let (min_x, min_y) = (-reach, -reach);
    let (max_x, max_y) = (buffer.width as f32 + reach, buffer.height as f32 + reach);

    // Liang-Barsky against the reachable rectangle.
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-dx, start.0 - min_x),
        (dx, max_x - start.0),
        (-dy, start.1 - min_y),
        (dy, max_y - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f32| {
        (
            (start.0 + dx * t).round() as i32,
            (start.1 + dy * t).round() as i32,
        )
    };
    Some((at(t0), at(t1)))
}

fn draw_brush(
    buffer: &mut RgbaBuffer,
    center: (i32, i32),
    color: Color,
    stroke_width: u32,
    compositing: Compositing,
) {
    let radius = (stroke_width.saturating_sub(1) / 2) as i32;
    for y in (center.1 - radius)..=(center.1 + radius) {
        for x in (center.0 - radius)..=(center.0 + radius) {
            let dx = x - center.0;
            let dy = y - center.1;
            if dx * dx + dy * dy <= radius * radius {
                buffer.write_pixel(x, y, color, compositing);
            }
        }
    }
}

/// Source-over copy of `top` onto `base`, anchored at the top-left corner and
/// clipped to the smaller of the two.
pub fn draw_image_over(base: &mut RgbaBuffer, top: &RgbaBuffer) {
    let width = base.width.min(top.width) as usize;
    let height = base.height.min(top.height) as usize;
    for y in 0..height {
        for x in 0..width {
            let src_idx = (y * top.width as usize + x) * 4;
            let dst_idx = (y * base.width as usize + x) * 4;
            let src = Color::from_rgba_array([
                top.pixels[src_idx],
                top.pixels[src_idx + 1],
                top.pixels[src_idx + 2],
                top.pixels[src_idx + 3],
            ]);
            let dst = Color::from_rgba_array([
                base.pixels[dst_idx],
                base.pixels[dst_idx + 1],
                base.pixels[dst_idx + 2],
                base.pixels[dst_idx + 3],
            ]);
            let out = blend_pixel(dst, src);
            base.pixels[dst_idx..dst_idx + 4].copy_from_slice(&out.to_rgba_array());
        }
    }
}

/// Flattens the ink layer onto an opaque background of the same size.
pub fn composite_over_background(ink: &RgbaBuffer, background: Color) -> RgbaBuffer {
    let mut output = RgbaBuffer::new(ink.width, ink.height, background);
    draw_image_over(&mut output, ink);
    output
}

fn blend_pixel(bottom: Color, top: Color) -> Color {
    if top.a == 255 {
        return top;
    }
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color::rgba(
        blend(top.r, bottom.r),
        blend(top.g, bottom.g),
        blend(top.b, bottom.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

fn erase_pixel(dst: Color, source_alpha: u8) -> Color {
    let keep = 1.0 - source_alpha as f32 / 255.0;
    let a = (dst.a as f32 * keep).round().clamp(0.0, 255.0) as u8;
    if a == 0 {
        return Color::TRANSPARENT;
    }
    Color::rgba(dst.r, dst.g, dst.b, a)
}
