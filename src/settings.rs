use crate::capture::model::{Color, StrokeStyle};
use crate::capture::{CaptureConfig, RejectionPolicy, Tool};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PANEL_SETTINGS_FILE_NAME: &str = "panel_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub rejection: RejectionPolicy,
    pub pen_width: u32,
    pub pen_color: Color,
    pub eraser_width: u32,
    pub supersample: u32,
    pub background: Color,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        let config = CaptureConfig::default();
        Self {
            rejection: config.policy,
            pen_width: config.pen.width,
            pen_color: config.pen.color,
            eraser_width: config.eraser_width,
            supersample: config.supersample,
            background: config.background,
        }
    }
}

impl CaptureSettings {
    pub fn to_config(&self) -> CaptureConfig {
        CaptureConfig {
            policy: self.rejection,
            tool: Tool::Pen,
            pen: StrokeStyle {
                width: self.pen_width,
                color: self.pen_color,
                ..StrokeStyle::default()
            },
            eraser_width: self.eraser_width,
            supersample: self.supersample,
            background: self.background,
        }
    }
}

/// Durations, in seconds, for the screen-owned timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub autosave_interval_secs: u64,
    pub autosave_flash_secs: u64,
    pub pharmacy_ready_secs: u64,
    pub redirect_countdown_secs: u64,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            autosave_interval_secs: 10,
            autosave_flash_secs: 1,
            pharmacy_ready_secs: 5,
            redirect_countdown_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Enable debug level logs.
    pub debug_logging: bool,
    pub log_file: Option<PathBuf>,
    pub capture: CaptureSettings,
    pub timers: TimerSettings,
    /// Where snapshots are written. Defaults to `rx_exports/` next to the executable.
    pub export_dir: Option<PathBuf>,
}

impl PanelSettings {
    /// Loads settings from `path`. A missing or empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read panel settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut loaded: Self = serde_json::from_str(&content)
            .with_context(|| format!("deserialize panel settings file {}", path.display()))?;
        loaded.sanitize();
        Ok(loaded)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings folder {}", parent.display()))?;
        }
        let mut sanitized = self.clone();
        sanitized.sanitize();
        let json = serde_json::to_string_pretty(&sanitized).context("serialize panel settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("write panel settings file {}", path.display()))
    }

    pub fn sanitize(&mut self) {
        let capture = &mut self.capture;
        capture.pen_width = capture.pen_width.max(1);
        capture.eraser_width = capture.eraser_width.max(1);
        capture.supersample = capture.supersample.max(1);
        self.timers.autosave_interval_secs = self.timers.autosave_interval_secs.max(1);
    }
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(PANEL_SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_in_defaults() {
        let json = r#"{"capture":{"rejection":{"kind":"area_filtered","max_extent":25.0}}}"#;
        let settings: PanelSettings = serde_json::from_str(json).expect("parse");
        assert_eq!(settings.capture.rejection, RejectionPolicy::area_filtered());
        assert_eq!(settings.capture.supersample, 2);
        assert_eq!(settings.timers.redirect_countdown_secs, 15);
    }

    #[test]
    fn sanitize_clamps_zero_sizes() {
        let mut settings = PanelSettings::default();
        settings.capture.pen_width = 0;
        settings.capture.supersample = 0;
        settings.sanitize();
        assert_eq!(settings.capture.pen_width, 1);
        assert_eq!(settings.capture.supersample, 1);
    }

    #[test]
    fn capture_settings_map_onto_surface_config() {
        let mut capture = CaptureSettings::default();
        capture.pen_width = 5;
        capture.pen_color = Color::rgba(0, 0, 128, 255);
        let config = capture.to_config();
        assert_eq!(config.pen.width, 5);
        assert_eq!(config.pen.color, Color::rgba(0, 0, 128, 255));
        assert_eq!(config.tool, Tool::Pen);
    }

    #[test]
    fn settings_path_is_resolved_next_to_executable() {
        let exe = Path::new("/tmp/panel/bin/doctor_panel");
        let path = settings_path_from_exe_path(exe).expect("path");
        assert_eq!(path, Path::new("/tmp/panel/bin").join(PANEL_SETTINGS_FILE_NAME));
    }
}
