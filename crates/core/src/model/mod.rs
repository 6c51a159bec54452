mod category;
mod ids;
mod problem;
mod result;
mod session;

pub use category::{Category, ParseCategoryError};
pub use ids::{ParseIdError, ProblemId, SessionId};

pub use problem::{Problem, ProblemDraft};
pub use result::ProblemResult;
pub use session::{CategoryTally, SessionStats, SessionStatsError};
