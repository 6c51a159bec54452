#![forbid(unsafe_code)]

pub mod error;
mod persist;
pub mod practice;
pub mod progress_service;
pub mod streak_service;
pub mod transfer;

pub use pilot_core::Clock;

pub use error::{ProgressError, SessionError, TransferError};
pub use practice::{
    AnswerFeedback, PracticeLoopService, PracticeSession, SessionLength, SessionOutcome,
    SessionProgress,
};
pub use progress_service::{Dashboard, ProgressService};
pub use streak_service::StreakService;
pub use transfer::{TransferReport, TransferService};
