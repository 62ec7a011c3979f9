use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(color: [u8; 4]) -> Self {
        Self::rgba(color[0], color[1], color[2], color[3])
    }
}

/// How a stroke segment is written into the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositing {
    /// Paint the stroke colour over whatever is there.
    SourceOver,
    /// Clear existing ink under the stroke.
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    /// Width in surface-local units; scaled by the supersample factor when rasterized.
    pub width: u32,
    pub color: Color,
    pub compositing: Compositing,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 3,
            color: Color::BLACK,
            compositing: Compositing::SourceOver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Pen,
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u32);

/// One pointer, stylus or finger interaction as reported by the host platform.
///
/// Positions are surface-local: the origin is the top-left corner of the
/// drawing region regardless of page scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub kind: PointerKind,
    /// Footprint width and height as reported by the digitizer.
    pub area: (f32, f32),
    pub position: (f32, f32),
}

impl Contact {
    pub fn new(id: u32, kind: PointerKind, position: (f32, f32)) -> Self {
        Self {
            id: ContactId(id),
            kind,
            area: (1.0, 1.0),
            position,
        }
    }

    pub fn with_area(mut self, width: f32, height: f32) -> Self {
        self.area = (width, height);
        self
    }

    pub fn moved_to(mut self, position: (f32, f32)) -> Self {
        self.position = position;
        self
    }

    pub fn footprint_extent(&self) -> f32 {
        self.area.0.max(self.area.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Normal,
    Minimized,
    Fullscreen,
}

/// On-screen size of the drawing region in surface-local units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSize {
    pub width: u32,
    pub height: u32,
}

impl RegionSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: u32) -> (u32, u32) {
        (
            self.width.saturating_mul(factor),
            self.height.saturating_mul(factor),
        )
    }
}
