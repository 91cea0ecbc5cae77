//! UDP receive side.
//!
//! ```text
//! socket -> decode_payload -> split_lines -> ListenerEvent::Line ...
//!                                         -> ListenerEvent::Stats
//! ```
//!
//! A listener reports through a single `std::sync::mpsc` channel. Errors
//! never cross the thread boundary as values other than
//! [`ListenerEvent::Error`]; conditions caused by an intentional stop are
//! swallowed and only the final `"Listener stopped"` status is sent.

mod decode;
mod error;
mod event;
mod target;
mod udp;


pub use decode::{decode_payload, split_lines};
pub use error::{BindError, ErrorClass, classify_error, is_closed_socket};
pub use event::{ListenerEvent, RxStats};
pub use target::{BindTarget, DEFAULT_BIND_ADDR, DEFAULT_PORT};
pub use udp::{Listener, ListenerHandle, ListenerState, MAX_DATAGRAM, POLL_INTERVAL, STOP_WAIT};
