pub mod config;
pub mod reveal;
pub mod session;

pub use config::SessionConfig;
pub use reveal::{reveal_text, RevealOptions, RevealOutcome};
pub use session::EditorSession;
