use crate::nav::screen::Screen;
use crate::patient::Patient;

/// Presentation-layer side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    ScrollToTop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    pub patient_replaced: bool,
    pub effects: Vec<NavEffect>,
}

/// Current screen plus the patient in context.
///
/// A supplied patient replaces the stored one and then sticks across every
/// later transition, including patient-agnostic screens, until another
/// patient is supplied. Nothing clears it, logout included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current: Screen,
    active_patient: Option<Patient>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: Screen::Login,
            active_patient: None,
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_screen(&self) -> Screen {
        self.current
    }

    pub fn active_patient(&self) -> Option<&Patient> {
        self.active_patient.as_ref()
    }

    /// The single mutation entry point. Never fails.
    pub fn navigate(&mut self, target: Screen, patient: Option<Patient>) -> Transition {
        let from = self.current;
        let patient_replaced = patient.is_some();
        if let Some(patient) = patient {
            tracing::debug!(patient = %patient.id, "active patient replaced");
            self.active_patient = Some(patient);
        }
        self.current = target;
        tracing::debug!(?from, to = ?target, "navigate");
        Transition {
            from,
            to: target,
            patient_replaced,
            effects: vec![NavEffect::ScrollToTop],
        }
    }

    /// Screen that will actually be shown: patient-scoped screens fall back to
    /// the dashboard when no patient is in context.
    pub fn rendered_screen(&self) -> Screen {
        if self.current.is_patient_scoped() && self.active_patient.is_none() {
            Screen::Dashboard
        } else {
            self.current
        }
    }

    /// Follows the static back target of the rendered screen, if it has one.
    pub fn back(&mut self) -> Option<Transition> {
        let target = self.rendered_screen().back_target()?;
        Some(self.navigate(target, None))
    }

    pub fn home(&mut self) -> Transition {
        self.navigate(Screen::Dashboard, None)
    }

    pub fn notifications(&mut self) -> Transition {
        self.navigate(Screen::Notifications, None)
    }

    /// Login performs no authentication.
    pub fn login(&mut self) -> Transition {
        self.navigate(Screen::Dashboard, None)
    }

    pub fn logout(&mut self) -> Transition {
        self.navigate(Screen::Login, None)
    }
}
