use crate::capture::{DisplayMode, FullscreenCapability};
use crate::consultation::{ConsultationWorkspace, Prescription};
use crate::nav::{
    format_hms, render, BottomNavItem, DraftBook, NavigationState, Screen, ScreenView, TaskEvent,
    TaskScheduler, Transition,
};
use crate::patient::Patient;
use crate::settings::PanelSettings;
use anyhow::{bail, Result};
use std::time::Instant;

/// The whole panel: navigation, screen timers, drafts and the prescription in progress.
///
/// Every transition goes through [`DoctorPanel::navigate`], which remounts the
/// timers of the screen that will actually be rendered.
pub struct DoctorPanel {
    settings: PanelSettings,
    nav: NavigationState,
    tasks: TaskScheduler,
    drafts: DraftBook,
    workspace: Option<ConsultationWorkspace>,
    prescription: Option<Prescription>,
    platform: Box<dyn FullscreenCapability>,
}

impl DoctorPanel {
    pub fn new(settings: PanelSettings, platform: Box<dyn FullscreenCapability>) -> Self {
        Self {
            tasks: TaskScheduler::new(settings.timers.clone()),
            settings,
            nav: NavigationState::new(),
            drafts: DraftBook::seeded(),
            workspace: None,
            prescription: None,
            platform,
        }
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn tasks(&self) -> &TaskScheduler {
        &self.tasks
    }

    pub fn drafts(&self) -> &DraftBook {
        &self.drafts
    }

    pub fn drafts_mut(&mut self) -> &mut DraftBook {
        &mut self.drafts
    }

    pub fn workspace(&self) -> Option<&ConsultationWorkspace> {
        self.workspace.as_ref()
    }

    pub fn workspace_mut(&mut self) -> Option<&mut ConsultationWorkspace> {
        self.workspace.as_mut()
    }

    pub fn prescription(&self) -> Option<&Prescription> {
        self.prescription.as_ref()
    }

    pub fn view(&self) -> ScreenView<'_> {
        render(&self.nav, self.prescription.as_ref())
    }

    pub fn navigate(&mut self, target: Screen, patient: Option<Patient>, now: Instant) -> Transition {
        let transition = self.nav.navigate(target, patient);
        self.after_transition(now, true);
        transition
    }

    fn after_transition(&mut self, now: Instant, stage_review: bool) {
        let rendered = self.nav.rendered_screen();
        self.tasks.mount(rendered, now);
        match rendered {
            Screen::Consultation => self.ensure_workspace(),
            Screen::Review if stage_review => self.stage_review(),
            _ => {}
        }
    }

    /// Builds the review's prescription from the open workspace, when there is one.
    fn stage_review(&mut self) {
        let active = self.nav.active_patient().map(|p| p.id.as_str());
        let Some(workspace) = self
            .workspace
            .as_ref()
            .filter(|ws| Some(ws.patient_id()) == active)
        else {
            return;
        };
        match workspace.send() {
            Ok(prescription) => self.prescription = Some(prescription),
            Err(err) => {
                tracing::debug!("nothing to review yet: {err:#}");
                self.prescription = None;
            }
        }
    }

    fn ensure_workspace(&mut self) {
        let Some(patient) = self.nav.active_patient() else {
            return;
        };
        let stale = self
            .workspace
            .as_ref()
            .map_or(true, |ws| ws.patient_id() != patient.id);
        if stale {
            tracing::debug!(patient = %patient.id, "new consultation workspace");
            self.workspace = Some(ConsultationWorkspace::new(
                &patient.id,
                self.settings.capture.to_config(),
            ));
        }
    }

    pub fn back(&mut self, now: Instant) -> Option<Transition> {
        let transition = self.nav.back()?;
        self.after_transition(now, true);
        Some(transition)
    }

    pub fn home(&mut self, now: Instant) -> Transition {
        self.navigate(Screen::Dashboard, None, now)
    }

    pub fn notifications(&mut self, now: Instant) -> Transition {
        self.navigate(Screen::Notifications, None, now)
    }

    pub fn bottom_nav(&mut self, item: BottomNavItem, now: Instant) -> Transition {
        self.navigate(item.target(), None, now)
    }

    pub fn login(&mut self, now: Instant) -> Transition {
        tracing::info!("doctor signed in");
        self.navigate(Screen::Dashboard, None, now)
    }

    pub fn logout(&mut self, now: Instant) -> Transition {
        tracing::info!("doctor signed out");
        self.navigate(Screen::Login, None, now)
    }

    pub fn manage_templates(&mut self, now: Instant) -> Transition {
        self.navigate(Screen::TemplateManagement, None, now)
    }

    pub fn resume_draft(&mut self, id: u32, now: Instant) -> Option<Transition> {
        let (screen, patient) = self.drafts.resume(id)?;
        tracing::debug!(draft = id, ?screen, "resuming draft");
        Some(self.navigate(screen, Some(patient), now))
    }

    fn require_screen(&self, screen: Screen) -> Result<()> {
        let rendered = self.nav.rendered_screen();
        if rendered != screen {
            bail!("expected to be on {screen:?}, but {rendered:?} is shown");
        }
        Ok(())
    }

    /// Builds the prescription from the workspace and opens the review.
    pub fn send_prescription(&mut self, now: Instant) -> Result<Transition> {
        self.require_screen(Screen::Consultation)?;
        let Some(workspace) = self.workspace.as_ref() else {
            bail!("no consultation workspace is open");
        };
        let prescription = workspace.send()?;
        tracing::info!(
            patient = %prescription.patient_id,
            mode = ?prescription.mode,
            medications = prescription.medications.len(),
            "prescription sent"
        );
        self.prescription = Some(prescription);
        let transition = self.nav.navigate(Screen::Review, None);
        self.after_transition(now, false);
        Ok(transition)
    }

    pub fn confirm_review(&mut self, now: Instant) -> Result<Transition> {
        self.require_screen(Screen::Review)?;
        let reviewed = match self.view() {
            ScreenView::Review { prescription, .. } => prescription.is_some(),
            _ => false,
        };
        if !reviewed {
            bail!("no prescription to confirm for the active patient");
        }
        self.workspace = None;
        tracing::info!("prescription confirmed");
        Ok(self.navigate(Screen::Success, None, now))
    }

    pub fn assign_treatment(&mut self, now: Instant) -> Result<Transition> {
        self.require_screen(Screen::Success)?;
        let patient = self.nav.active_patient().cloned();
        Ok(self.navigate(Screen::TreatmentAssignment, patient, now))
    }

    pub fn finish_treatment(&mut self, now: Instant) -> Result<Transition> {
        self.require_screen(Screen::TreatmentAssignment)?;
        tracing::info!("treatment plan assigned");
        Ok(self.navigate(Screen::Dashboard, None, now))
    }

    /// Advances the current screen's timers and applies any redirect that fell due.
    pub fn tick(&mut self, now: Instant) -> Vec<TaskEvent> {
        let events = self.tasks.tick(now);
        for event in &events {
            if let TaskEvent::RedirectDue(target) = *event {
                self.navigate(target, None, now);
            }
        }
        events
    }

    pub fn cancel_redirect(&mut self) -> bool {
        self.tasks.cancel_redirect()
    }

    pub fn session_clock(&self, now: Instant) -> Option<String> {
        self.tasks.session_elapsed(now).map(format_hms)
    }

    pub fn toggle_capture_display(&mut self) -> Option<DisplayMode> {
        let workspace = self.workspace.as_mut()?;
        Some(workspace.surface.toggle_display_mode(self.platform.as_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::HeadlessDisplay;
    use crate::nav::SaveStatus;
    use crate::patient::find_by_id;
    use std::time::Duration;

    fn panel() -> DoctorPanel {
        DoctorPanel::new(PanelSettings::default(), Box::new(HeadlessDisplay::default()))
    }

    #[test]
    fn entering_consultation_opens_workspace_for_patient() {
        let mut panel = panel();
        let now = Instant::now();
        panel.navigate(Screen::Consultation, find_by_id("ZN045"), now);
        assert_eq!(panel.workspace().map(|ws| ws.patient_id()), Some("ZN045"));
        assert_eq!(panel.tasks().save_status(), Some(SaveStatus::Saved));
    }

    #[test]
    fn redirect_tick_returns_to_dashboard() {
        let mut panel = panel();
        let t0 = Instant::now();
        panel.navigate(Screen::Consultation, find_by_id("ZN001"), t0);
        panel.send_prescription(t0).expect("send");
        panel.confirm_review(t0).expect("confirm");
        panel.tick(t0 + Duration::from_secs(15));
        assert_eq!(panel.nav().current_screen(), Screen::Dashboard);
    }

    #[test]
    fn send_outside_consultation_is_rejected() {
        let mut panel = panel();
        assert!(panel.send_prescription(Instant::now()).is_err());
        assert_eq!(panel.nav().current_screen(), Screen::Login);
    }

    #[test]
    fn capture_display_toggle_needs_a_workspace() {
        let mut panel = panel();
        assert_eq!(panel.toggle_capture_display(), None);
        panel.navigate(Screen::Consultation, find_by_id("ZN001"), Instant::now());
        assert_eq!(panel.toggle_capture_display(), Some(DisplayMode::Fullscreen));
    }
}
