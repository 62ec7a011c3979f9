pub mod drafts;
pub mod screen;
pub mod state;
pub mod tasks;
pub mod view;

pub use drafts::{Draft, DraftBook, DraftKind};
pub use screen::{BottomNavItem, Screen};
pub use state::{NavEffect, NavigationState, Transition};
pub use tasks::{format_hms, PharmacyStatus, SaveStatus, TaskEvent, TaskScheduler};
pub use view::{render, ScreenView};
