//! Ingestion between the listener and the display.

mod ingest;
mod pause;
mod timestamp;

#[cfg(test)]
mod tests;

pub use ingest::{Disposition, IngestionPipeline};
pub use pause::{PAUSE_CAPACITY, PauseBuffer};
pub use timestamp::{format_timestamp_prefix, stamp_line};
