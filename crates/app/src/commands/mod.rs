pub mod data;
pub mod practice;
pub mod reference;
pub mod stats;
