mod hud;
mod scan;
mod state;

pub use hud::Hud;
pub use scan::{lock_view, Scanner, FOCUS_HOLD};
pub use state::{ScanData, ViewState};
