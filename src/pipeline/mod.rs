//! Pipeline module - load, derive, aggregate, filter and correlate

pub mod categorical;
pub mod correlation;
pub mod error;
pub mod features;
pub mod loader;
pub mod outliers;

pub use categorical::*;
pub use correlation::*;
pub use error::PipelineError;
pub use features::*;
pub use loader::*;
pub use outliers::*;
