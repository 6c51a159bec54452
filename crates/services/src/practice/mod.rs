mod length;
mod progress;
mod session;
mod workflow;

// Public API of the practice subsystem.
pub use crate::error::SessionError;
pub use length::SessionLength;
pub use progress::SessionProgress;
pub use session::{AnswerFeedback, PracticeSession, SessionOutcome, WARNING_THRESHOLD_SECS};
pub use workflow::PracticeLoopService;
