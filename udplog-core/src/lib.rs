//! Ingestion core of the `udplog` viewer.
//!
//! Text records arrive as UDP datagrams, are split into lines, filtered by
//! slot-based rules, optionally persisted to a per-connection live file and
//! handed to a display sink in bounded batches.

pub mod cli;
pub mod conf;
pub mod display;
pub mod listener;
pub mod logging;
pub mod pipeline;
pub mod rules;
pub mod session;
pub mod viewer;
