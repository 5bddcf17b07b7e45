//! Report module - run summary and analysis export

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
