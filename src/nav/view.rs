use crate::consultation::Prescription;
use crate::nav::screen::Screen;
use crate::nav::state::NavigationState;
use crate::patient::Patient;

/// What the presentation layer should draw, with the data each screen reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenView<'a> {
    Login,
    Dashboard,
    PatientOverview { patient: &'a Patient },
    ViewLastPrescription { patient: &'a Patient },
    ConsultationSession { patient: &'a Patient },
    Consultation { patient: &'a Patient },
    Review {
        patient: &'a Patient,
        prescription: Option<&'a Prescription>,
    },
    Success { patient: &'a Patient },
    Drafts,
    Search,
    HistoryList,
    HistoryDetail { patient: &'a Patient },
    Settings,
    Help,
    TreatmentAssignment { patient: &'a Patient },
    TemplateManagement,
    Notifications,
}

impl<'a> ScreenView<'a> {
    pub fn screen(&self) -> Screen {
        match self {
            ScreenView::Login => Screen::Login,
            ScreenView::Dashboard => Screen::Dashboard,
            ScreenView::PatientOverview { .. } => Screen::PatientOverview,
            ScreenView::ViewLastPrescription { .. } => Screen::ViewLastPrescription,
            ScreenView::ConsultationSession { .. } => Screen::ConsultationSession,
            ScreenView::Consultation { .. } => Screen::Consultation,
            ScreenView::Review { .. } => Screen::Review,
            ScreenView::Success { .. } => Screen::Success,
            ScreenView::Drafts => Screen::Drafts,
            ScreenView::Search => Screen::Search,
            ScreenView::HistoryList => Screen::HistoryList,
            ScreenView::HistoryDetail { .. } => Screen::HistoryDetail,
            ScreenView::Settings => Screen::Settings,
            ScreenView::Help => Screen::Help,
            ScreenView::TreatmentAssignment { .. } => Screen::TreatmentAssignment,
            ScreenView::TemplateManagement => Screen::TemplateManagement,
            ScreenView::Notifications => Screen::Notifications,
        }
    }

    pub fn patient(&self) -> Option<&'a Patient> {
        match *self {
            ScreenView::PatientOverview { patient }
            | ScreenView::ViewLastPrescription { patient }
            | ScreenView::ConsultationSession { patient }
            | ScreenView::Consultation { patient }
            | ScreenView::Review { patient, .. }
            | ScreenView::Success { patient }
            | ScreenView::HistoryDetail { patient }
            | ScreenView::TreatmentAssignment { patient } => Some(patient),
            ScreenView::Login
            | ScreenView::Dashboard
            | ScreenView::Drafts
            | ScreenView::Search
            | ScreenView::HistoryList
            | ScreenView::Settings
            | ScreenView::Help
            | ScreenView::TemplateManagement
            | ScreenView::Notifications => None,
        }
    }
}

/// Pure render dispatch. Patient-scoped screens without a patient become the dashboard.
pub fn render<'a>(
    state: &'a NavigationState,
    prescription: Option<&'a Prescription>,
) -> ScreenView<'a> {
    let patient = state.active_patient();
    let scoped = |build: fn(&'a Patient) -> ScreenView<'a>| match patient {
        Some(patient) => build(patient),
        None => ScreenView::Dashboard,
    };

    match state.current_screen() {
        Screen::Login => ScreenView::Login,
        Screen::Dashboard => ScreenView::Dashboard,
        Screen::PatientOverview => scoped(|patient| ScreenView::PatientOverview { patient }),
        Screen::ViewLastPrescription => {
            scoped(|patient| ScreenView::ViewLastPrescription { patient })
        }
        Screen::ConsultationSession => {
            scoped(|patient| ScreenView::ConsultationSession { patient })
        }
        Screen::Consultation => scoped(|patient| ScreenView::Consultation { patient }),
        Screen::Review => match patient {
            Some(patient) => ScreenView::Review {
                patient,
                prescription: prescription.filter(|rx| rx.patient_id == patient.id),
            },
            None => ScreenView::Dashboard,
        },
        Screen::Success => scoped(|patient| ScreenView::Success { patient }),
        Screen::Drafts => ScreenView::Drafts,
        Screen::Search => ScreenView::Search,
        Screen::HistoryList => ScreenView::HistoryList,
        Screen::HistoryDetail => scoped(|patient| ScreenView::HistoryDetail { patient }),
        Screen::Settings => ScreenView::Settings,
        Screen::Help => ScreenView::Help,
        Screen::TreatmentAssignment => {
            scoped(|patient| ScreenView::TreatmentAssignment { patient })
        }
        Screen::TemplateManagement => ScreenView::TemplateManagement,
        Screen::Notifications => ScreenView::Notifications,
    }
}
