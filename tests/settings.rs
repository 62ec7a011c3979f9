use doctor_panel::capture::model::Color;
use doctor_panel::capture::RejectionPolicy;
use doctor_panel::PanelSettings;
use std::fs;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loaded = PanelSettings::load(&dir.path().join("panel_settings.json")).expect("load");
    assert_eq!(loaded, PanelSettings::default());
}

#[test]
fn empty_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("panel_settings.json");
    fs::write(&path, "  \n").expect("write");
    assert_eq!(PanelSettings::load(&path).expect("load"), PanelSettings::default());
}

#[test]
fn saved_settings_load_back_sanitized() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("panel_settings.json");

    let mut settings = PanelSettings::default();
    settings.debug_logging = true;
    settings.capture.rejection = RejectionPolicy::area_filtered();
    settings.capture.pen_color = Color::rgba(10, 20, 30, 255);
    settings.capture.eraser_width = 0;
    settings.timers.redirect_countdown_secs = 30;
    settings.save(&path).expect("save");

    let loaded = PanelSettings::load(&path).expect("load");
    assert!(loaded.debug_logging);
    assert_eq!(loaded.capture.rejection, RejectionPolicy::area_filtered());
    assert_eq!(loaded.capture.pen_color, Color::rgba(10, 20, 30, 255));
    assert_eq!(loaded.capture.eraser_width, 1);
    assert_eq!(loaded.timers.redirect_countdown_secs, 30);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("panel_settings.json");
    fs::write(&path, "{ not json").expect("write");
    let err = PanelSettings::load(&path).expect_err("malformed settings");
    assert!(format!("{err:#}").contains("deserialize panel settings file"));
}
