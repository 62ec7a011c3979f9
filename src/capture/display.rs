use crate::capture::model::DisplayMode;
use anyhow::{anyhow, Result};

/// Platform fullscreen support. Implementations hide vendor differences.
pub trait FullscreenCapability {
    fn request_fullscreen(&mut self) -> Result<()>;
    fn exit_fullscreen(&mut self) -> Result<()>;
    fn is_fullscreen(&self) -> bool;
}

/// In-process stand-in used by the demo binary and tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDisplay {
    fullscreen: bool,
    deny_requests: bool,
}

impl HeadlessDisplay {
    pub fn denying() -> Self {
        Self {
            fullscreen: false,
            deny_requests: true,
        }
    }
}

impl FullscreenCapability for HeadlessDisplay {
    fn request_fullscreen(&mut self) -> Result<()> {
        if self.deny_requests {
            return Err(anyhow!("fullscreen request denied by platform"));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = false;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

/// Next mode for the fullscreen toggle. Minimized restores to normal first.
pub fn toggled(mode: DisplayMode) -> DisplayMode {
    match mode {
        DisplayMode::Normal => DisplayMode::Fullscreen,
        DisplayMode::Fullscreen | DisplayMode::Minimized => DisplayMode::Normal,
    }
}

/// Applies a mode change through the platform. Failures leave `current` in place.
pub fn apply_mode(
    current: DisplayMode,
    next: DisplayMode,
    platform: &mut dyn FullscreenCapability,
) -> DisplayMode {
    if current == next {
        return current;
    }
    let result = match (current, next) {
        (_, DisplayMode::Fullscreen) => platform.request_fullscreen(),
        (DisplayMode::Fullscreen, _) if platform.is_fullscreen() => platform.exit_fullscreen(),
        _ => Ok(()),
    };
    match result {
        Ok(()) => {
            tracing::debug!(?current, ?next, "capture display mode changed");
            next
        }
        Err(err) => {
            tracing::warn!(?current, ?next, "display mode change failed: {err:#}");
            current
        }
    }
}
