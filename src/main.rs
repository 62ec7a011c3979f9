use anyhow::{anyhow, Context};
use doctor_panel::capture::{export, Contact, HeadlessDisplay, PointerKind};
use doctor_panel::consultation::PrescriptionMode;
use doctor_panel::nav::Screen;
use doctor_panel::patient::find_by_id;
use doctor_panel::settings::{resolve_settings_path, PanelSettings};
use doctor_panel::DoctorPanel;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let settings_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => resolve_settings_path()?,
    };
    let settings = PanelSettings::load(&settings_path)?;
    doctor_panel::logging::init(settings.debug_logging, settings.log_file.clone());
    tracing::info!(settings = %settings_path.display(), "doctor panel starting");

    let export_dir = match settings.export_dir.clone() {
        Some(dir) => dir,
        None => export::default_output_folder()?,
    };
    let mut panel = DoctorPanel::new(settings, Box::new(HeadlessDisplay::default()));
    let now = Instant::now();

    panel.login(now);
    let patient = find_by_id("ZN001").ok_or_else(|| anyhow!("demo patient ZN001 missing"))?;
    panel.navigate(Screen::PatientOverview, Some(patient.clone()), now);
    panel.navigate(Screen::ConsultationSession, None, now);
    panel.navigate(Screen::Consultation, None, now);

    let workspace = panel
        .workspace_mut()
        .ok_or_else(|| anyhow!("consultation workspace was not opened"))?;
    workspace.select_mode(PrescriptionMode::Pen);
    let pen = Contact::new(1, PointerKind::Pen, (40.0, 60.0));
    workspace.surface.on_contact_down(&pen);
    for step in 1..=20 {
        let x = 40.0 + step as f32 * 12.0;
        let y = 60.0 + (step as f32 * 0.6).sin() * 20.0;
        workspace.surface.on_contact_move(&pen.moved_to((x, y)));
    }
    workspace.surface.on_contact_up(&pen);

    panel.send_prescription(now)?;
    panel.confirm_review(now)?;

    let snapshot = panel
        .prescription()
        .and_then(|rx| rx.pen.clone())
        .ok_or_else(|| anyhow!("sent prescription carries no handwriting"))?;
    let path = export::save_snapshot(&snapshot, &export_dir, &patient.id, chrono::Local::now())
        .context("save demo prescription")?;
    println!("{}", path.display());
    Ok(())
}
