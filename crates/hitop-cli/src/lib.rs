//! CLI library components for the HiTOP pipeline.

pub mod logging;
pub mod report;
