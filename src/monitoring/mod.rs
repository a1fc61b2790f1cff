//! Run Monitoring Module
//!
//! Tracks the timing and outcome of each demo step.
//!
//! # Components
//!
//! - [`ExecutionTimeline`]: step start/finish records, summary and Gantt chart

pub mod timeline;

pub use timeline::{ExecutionTimeline, StepRecord, StepStatus, TimelineSummary};
