use thiserror::Error;

use crate::model::{ParseCategoryError, ParseIdError, SessionStatsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Category(#[from] ParseCategoryError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    Session(#[from] SessionStatsError),
}
