use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    Dashboard,
    PatientOverview,
    ViewLastPrescription,
    ConsultationSession,
    Consultation,
    Review,
    Success,
    Drafts,
    Search,
    HistoryList,
    HistoryDetail,
    Settings,
    Help,
    TreatmentAssignment,
    TemplateManagement,
    Notifications,
}

impl Screen {
    pub const ALL: [Screen; 17] = [
        Screen::Login,
        Screen::Dashboard,
        Screen::PatientOverview,
        Screen::ViewLastPrescription,
        Screen::ConsultationSession,
        Screen::Consultation,
        Screen::Review,
        Screen::Success,
        Screen::Drafts,
        Screen::Search,
        Screen::HistoryList,
        Screen::HistoryDetail,
        Screen::Settings,
        Screen::Help,
        Screen::TreatmentAssignment,
        Screen::TemplateManagement,
        Screen::Notifications,
    ];

    /// Screens that cannot render without an active patient.
    pub fn is_patient_scoped(self) -> bool {
        match self {
            Screen::PatientOverview
            | Screen::ViewLastPrescription
            | Screen::ConsultationSession
            | Screen::Consultation
            | Screen::Review
            | Screen::Success
            | Screen::TreatmentAssignment
            | Screen::HistoryDetail => true,
            Screen::Login
            | Screen::Dashboard
            | Screen::Drafts
            | Screen::Search
            | Screen::HistoryList
            | Screen::Settings
            | Screen::Help
            | Screen::TemplateManagement
            | Screen::Notifications => false,
        }
    }

    /// Fixed back destination. Independent of how the screen was reached.
    pub fn back_target(self) -> Option<Screen> {
        match self {
            Screen::Login | Screen::Dashboard | Screen::Success => None,
            Screen::PatientOverview => Some(Screen::Dashboard),
            Screen::ViewLastPrescription => Some(Screen::PatientOverview),
            Screen::ConsultationSession => Some(Screen::PatientOverview),
            Screen::Consultation => Some(Screen::ConsultationSession),
            Screen::Review => Some(Screen::Consultation),
            Screen::TreatmentAssignment => Some(Screen::Success),
            Screen::HistoryDetail => Some(Screen::HistoryList),
            Screen::TemplateManagement => Some(Screen::Consultation),
            Screen::Drafts
            | Screen::Search
            | Screen::HistoryList
            | Screen::Settings
            | Screen::Help
            | Screen::Notifications => Some(Screen::Dashboard),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => "SIGN IN",
            Screen::Dashboard => "TODAY'S QUEUE",
            Screen::PatientOverview => "PATIENT",
            Screen::ViewLastPrescription => "LAST PRESCRIPTION",
            Screen::ConsultationSession => "CONSULTATION",
            Screen::Consultation => "PRESCRIPTION",
            Screen::Review => "FINAL REVIEW",
            Screen::Success => "SENT",
            Screen::Drafts => "DRAFTS",
            Screen::Search => "SEARCH",
            Screen::HistoryList => "HISTORY",
            Screen::HistoryDetail => "MEDICAL HISTORY",
            Screen::Settings => "SETTINGS",
            Screen::Help => "HELP & SUPPORT",
            Screen::TreatmentAssignment => "ASSIGN TREATMENT",
            Screen::TemplateManagement => "TEMPLATES",
            Screen::Notifications => "NOTIFICATIONS",
        }
    }
}

/// Items in the persistent bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomNavItem {
    Home,
    Drafts,
    History,
    Settings,
}

impl BottomNavItem {
    pub const ALL: [BottomNavItem; 4] = [
        BottomNavItem::Home,
        BottomNavItem::Drafts,
        BottomNavItem::History,
        BottomNavItem::Settings,
    ];

    pub fn target(self) -> Screen {
        match self {
            BottomNavItem::Home => Screen::Dashboard,
            BottomNavItem::Drafts => Screen::Drafts,
            BottomNavItem::History => Screen::HistoryList,
            BottomNavItem::Settings => Screen::Settings,
        }
    }

    /// History stays highlighted while a patient's history detail is open.
    pub fn is_active_on(self, screen: Screen) -> bool {
        self.target() == screen
            || (self == BottomNavItem::History && screen == Screen::HistoryDetail)
    }
}
