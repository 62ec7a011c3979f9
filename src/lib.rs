pub mod capture;
pub mod consultation;
pub mod logging;
pub mod nav;
pub mod panel;
pub mod patient;
pub mod settings;

pub use panel::DoctorPanel;
pub use settings::PanelSettings;
