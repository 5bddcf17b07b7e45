//! Medviz: Medical Examination Visualizer Library
//!
//! A library for deriving cardiovascular risk indicators from examination
//! records, counting categorical risk factors, trimming outliers and
//! rendering count and correlation plots.

pub mod cli;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod utils;
