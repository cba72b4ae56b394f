// src/report/mod.rs

//! Reporting boundary: joins scheduling outputs with labels.
//!
//! Nothing in here feeds back into scheduling. The binary prints the
//! rendered text to stdout; no files are written.

pub mod labels;
pub mod render;
pub mod rows;
pub mod summary;

pub use labels::{LabelTable, UNKNOWN_RESOURCE, UNKNOWN_STAGE};
pub use rows::{ScheduleReport, ScheduledOp};
pub use summary::{ResourceUsage, Summary};
