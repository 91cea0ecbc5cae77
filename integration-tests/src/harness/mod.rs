pub mod tracing;
pub mod udp;

pub use tracing::{CapturedEvent, init_test_tracing};
pub use udp::{EventCollector, loopback_target, send_datagram};
