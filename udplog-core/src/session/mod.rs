//! Per-connection live logfile and the save operation.
//!
//! Every connection gets its own `udp_live_<YYYYMMDD_HHMMSS>.txt`, opened
//! when the listener starts and closed when it stops. Accepted lines are
//! appended whether or not the display is paused.

mod error;
mod live;
mod paths;
mod save;


pub use error::{LiveLogError, SaveError};
pub use live::{LiveLog, LiveLogSession};
pub use paths::{default_save_name, live_file_name, resolve_logs_dir, session_stamp};
pub use save::{SaveOutcome, save_log};
