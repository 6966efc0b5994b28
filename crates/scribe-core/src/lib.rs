pub mod document;
pub mod session;

pub use document::memory::TextDocument;
pub use document::{ChangeListener, DocumentAdapter};
pub use session::events::EditorEvent;
pub use session::machine::SessionMachine;
pub use session::state::{SessionPhase, SessionSnapshot, SessionState};
pub use session::{SessionEvent, Transition};
