use crate::capture::display::{self, FullscreenCapability};
use crate::capture::export::{decode_png, encode_png, EncodedImage};
use crate::capture::input::{CaptureInput, ContactStats, IgnoreReason, InputOutcome};
use crate::capture::model::{
    Color, Compositing, Contact, DisplayMode, RegionSize, StrokeStyle, Tool,
};
use crate::capture::palm::RejectionPolicy;
use crate::capture::raster::{
    clip_segment, composite_over_background, draw_image_over, draw_segment, DirtyRect,
    RgbaBuffer,
};
use anyhow::Result;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    pub policy: RejectionPolicy,
    pub tool: Tool,
    pub pen: StrokeStyle,
    pub eraser_width: u32,
    /// Integer factor between the region's on-screen size and the raster.
    pub supersample: u32,
    pub background: Color,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            policy: RejectionPolicy::default(),
            tool: Tool::Pen,
            pen: StrokeStyle::default(),
            eraser_width: 20,
            supersample: 2,
            background: Color::WHITE,
        }
    }
}

/// Handle for a resize whose restore has not been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTicket {
    pub seq: u64,
    pub size: RegionSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    /// A newer resize superseded this one; the restore was dropped.
    Stale,
}

#[derive(Debug, Clone)]
struct PendingRestore {
    seq: u64,
    snapshot: EncodedImage,
}

/// Freehand prescription surface: pointer state machine plus the persistent raster.
#[derive(Debug, Clone)]
pub struct CaptureSurface {
    config: CaptureConfig,
    input: CaptureInput,
    region: RegionSize,
    raster: RgbaBuffer,
    display_mode: DisplayMode,
    resize_seq: u64,
    pending_restore: Option<PendingRestore>,
    dirty: Option<DirtyRect>,
}

impl CaptureSurface {
    pub fn new(region: RegionSize, mut config: CaptureConfig) -> Self {
        config.supersample = config.supersample.max(1);
        let (width, height) = region.scaled(config.supersample);
        Self {
            input: CaptureInput::new(config.tool, config.policy),
            raster: RgbaBuffer::new(width, height, config.background),
            config,
            region,
            display_mode: DisplayMode::Normal,
            resize_seq: 0,
            pending_restore: None,
            dirty: None,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn region(&self) -> RegionSize {
        self.region
    }

    pub fn raster(&self) -> &RgbaBuffer {
        &self.raster
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn tool(&self) -> Tool {
        self.input.tool()
    }

    pub fn stats(&self) -> ContactStats {
        self.input.stats()
    }

    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    pub fn restore_pending(&self) -> bool {
        self.pending_restore.is_some()
    }

    pub fn configure(&mut self, policy: RejectionPolicy, tool: Tool) {
        self.config.policy = policy;
        self.config.tool = tool;
        self.input.set_policy(policy);
        self.input.set_tool(tool);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.config.tool = tool;
        self.input.set_tool(tool);
    }

    fn input_enabled(&self) -> bool {
        self.pending_restore.is_none() && self.display_mode != DisplayMode::Minimized
    }

    pub fn on_contact_down(&mut self, contact: &Contact) -> InputOutcome {
        if !self.input_enabled() {
            return InputOutcome::Ignored(IgnoreReason::InputDisabled);
        }
        let outcome = self.input.handle_down(contact);
        if let InputOutcome::Started { .. } = outcome {
            tracing::debug!(contact = ?contact.id, kind = ?contact.kind, "stroke started");
        }
        self.apply(outcome);
        outcome
    }

    pub fn on_contact_move(&mut self, contact: &Contact) -> InputOutcome {
        if !self.input_enabled() {
            return InputOutcome::Ignored(IgnoreReason::InputDisabled);
        }
        let outcome = self.input.handle_move(contact);
        if let InputOutcome::Suspended(reason) = outcome {
            tracing::debug!(contact = ?contact.id, ?reason, "stroke suspended by palm rejection");
        }
        self.apply(outcome);
        outcome
    }

    pub fn on_contact_up(&mut self, contact: &Contact) -> InputOutcome {
        self.input.handle_up(contact)
    }

    pub fn on_contact_cancel(&mut self, contact: &Contact) -> InputOutcome {
        self.input.handle_cancel(contact)
    }

    fn to_buffer_space(&self, point: (f32, f32)) -> (f32, f32) {
        let scale = self.config.supersample as f32;
        (point.0 * scale, point.1 * scale)
    }

    /// Region of the raster changed since the last call, for partial repaints.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    fn mark_dirty(&mut self, rect: Option<DirtyRect>) {
        self.dirty = match (self.dirty, rect) {
            (Some(current), Some(rect)) => Some(current.union(rect)),
            (current, rect) => current.or(rect),
        };
    }

    fn mark_all_dirty(&mut self) {
        self.mark_dirty(DirtyRect::full(self.raster.width, self.raster.height));
    }

    fn stamp(&mut self, from: (f32, f32), to: (f32, f32), tool: Tool) {
        let (color, width, compositing) = self.brush_for(tool);
        let start = self.to_buffer_space(from);
        let end = self.to_buffer_space(to);
        let Some((start, end)) = clip_segment(&self.raster, start, end, width) else {
            return;
        };
        let touched = draw_segment(&mut self.raster, start, end, color, width, compositing);
        self.mark_dirty(touched);
    }

    fn brush_for(&self, tool: Tool) -> (Color, u32, Compositing) {
        let scale = self.config.supersample;
        match tool {
            Tool::Pen => (
                self.config.pen.color,
                self.config.pen.width.max(1).saturating_mul(scale),
                self.config.pen.compositing,
            ),
            Tool::Eraser => (
                Color::BLACK,
                self.config.eraser_width.max(1).saturating_mul(scale),
                Compositing::DestinationOut,
            ),
        }
    }

    fn apply(&mut self, outcome: InputOutcome) {
        match outcome {
            InputOutcome::Started { at, tool } => self.stamp(at, at, tool),
            InputOutcome::Extended { from, to, tool } => self.stamp(from, to, tool),
            InputOutcome::Suspended(_)
            | InputOutcome::Ended { .. }
            | InputOutcome::Rejected(_)
            | InputOutcome::Ignored(_) => {}
        }
    }

    /// Resets the raster to the background. Irreversible.
    pub fn clear(&mut self) {
        self.raster.fill(self.config.background);
        self.mark_all_dirty();
        if self.pending_restore.take().is_some() {
            tracing::debug!("clear dropped pending resize restore");
        }
    }

    /// Reallocates the raster for `size` and returns the ticket for the restore.
    ///
    /// Input is disabled until [`complete_resize`](Self::complete_resize) is
    /// called with the newest ticket. A resize issued while another restore is
    /// pending carries the older snapshot forward, so nothing is lost when the
    /// earlier completion is later dropped as stale.
    pub fn begin_resize(&mut self, size: RegionSize) -> Result<ResizeTicket> {
        let snapshot = match self.pending_restore.take() {
            Some(pending) => pending.snapshot,
            None => encode_png(&self.raster)?,
        };

        self.input.abort_active();
        self.resize_seq += 1;
        let (width, height) = size.scaled(self.config.supersample);
        self.raster = RgbaBuffer::new(width, height, self.config.background);
        self.region = size;
        self.dirty = None;
        self.mark_all_dirty();
        self.pending_restore = Some(PendingRestore {
            seq: self.resize_seq,
            snapshot,
        });
        tracing::debug!(seq = self.resize_seq, width, height, "capture surface resize started");
        Ok(ResizeTicket {
            seq: self.resize_seq,
            size,
        })
    }

    pub fn complete_resize(&mut self, ticket: ResizeTicket) -> Result<RestoreOutcome> {
        let current = self.pending_restore.as_ref().map(|pending| pending.seq);
        if current != Some(ticket.seq) {
            tracing::debug!(seq = ticket.seq, ?current, "dropping stale resize restore");
            return Ok(RestoreOutcome::Stale);
        }
        let Some(pending) = self.pending_restore.take() else {
            return Ok(RestoreOutcome::Stale);
        };
        let captured = decode_png(&pending.snapshot)?;
        draw_image_over(&mut self.raster, &captured);
        self.mark_all_dirty();
        Ok(RestoreOutcome::Restored)
    }

    /// Resize with the restore applied immediately.
    pub fn resize(&mut self, size: RegionSize) -> Result<()> {
        let ticket = self.begin_resize(size)?;
        self.complete_resize(ticket)?;
        Ok(())
    }

    pub fn toggle_display_mode(&mut self, platform: &mut dyn FullscreenCapability) -> DisplayMode {
        let next = display::toggled(self.display_mode);
        self.set_display_mode(next, platform)
    }

    pub fn set_display_mode(
        &mut self,
        mode: DisplayMode,
        platform: &mut dyn FullscreenCapability,
    ) -> DisplayMode {
        self.display_mode = display::apply_mode(self.display_mode, mode, platform);
        if self.display_mode == DisplayMode::Minimized {
            self.input.abort_active();
        }
        self.display_mode
    }

    /// Raster as it will look once any pending restore has been applied.
    fn settled_raster(&self) -> Result<Cow<'_, RgbaBuffer>> {
        match &self.pending_restore {
            None => Ok(Cow::Borrowed(&self.raster)),
            Some(pending) => {
                let mut preview = self.raster.clone();
                draw_image_over(&mut preview, &decode_png(&pending.snapshot)?);
                Ok(Cow::Owned(preview))
            }
        }
    }

    /// Whether anything visible differs from a blank surface. Erased areas
    /// count as background.
    pub fn has_ink(&self) -> Result<bool> {
        let raster = self.settled_raster()?;
        let background = self.config.background;
        Ok(composite_over_background(&raster, background).count_differing(background) > 0)
    }

    /// PNG of the ink flattened over the background.
    pub fn export_snapshot(&self) -> Result<EncodedImage> {
        let raster = self.settled_raster()?;
        encode_png(&composite_over_background(&raster, self.config.background))
    }
}
