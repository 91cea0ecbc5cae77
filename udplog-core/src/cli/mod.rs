pub mod config;
pub mod listen;
pub mod replay;


pub use config::ConfigCmd;
pub use listen::{ListenArgs, run_listen};
pub use replay::{ReplayArgs, run_replay};

use crate::display::{DisplayMode, default_display_mode};

/// `--plain` / `--pretty` selection, falling back to TTY detection.
pub(crate) fn display_mode(plain: bool, pretty: bool) -> DisplayMode {
    if plain {
        DisplayMode::Plain
    } else if pretty {
        DisplayMode::Pretty
    } else {
        default_display_mode()
    }
}
