#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod numeric;
pub mod problems;
pub mod random;
pub mod stats;
pub mod streak;
pub mod time;

pub use error::Error;
pub use time::Clock;
