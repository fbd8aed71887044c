pub mod manager;
pub mod state;

pub use manager::{SessionManager, SessionManagerHandle};
pub use state::{Phase, SelectedImage, SessionEvent, SessionState};
