//! The consumer loop tying listener, pipeline and display together.
//!
//! ```text
//! Listener --mpsc--> Viewer::tick --> IngestionPipeline --> DisplayQueue
//! stdin / Ctrl-C --mpsc--> Viewer::handle_command          |
//!                                         Scrollback <-----+----> DisplaySink
//! ```

mod command;
mod replay;
mod simulate;
mod status;
#[allow(clippy::module_inception)]
mod viewer;

#[cfg(test)]
mod tests;

pub use command::{Command, HELP};
pub use replay::{REPLAY_LINES_PER_TICK, REPLAY_TICK, ReplaySource, SAMPLE_LINES};
pub use simulate::{SIMULATION_INTERVAL, Simulator};
pub use status::format_bytes;
pub use viewer::{EVENT_BATCHES_PER_TICK, Flow, LOOP_IDLE_SLEEP, Viewer};
