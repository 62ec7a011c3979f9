pub mod display;
pub mod export;
pub mod input;
pub mod model;
pub mod palm;
pub mod raster;
pub mod surface;

pub use display::{FullscreenCapability, HeadlessDisplay};
pub use export::EncodedImage;
pub use input::{InputOutcome, IgnoreReason};
pub use model::{Contact, ContactId, DisplayMode, PointerKind, RegionSize, Tool};
pub use palm::RejectionPolicy;
pub use surface::{CaptureConfig, CaptureSurface, ResizeTicket, RestoreOutcome};
