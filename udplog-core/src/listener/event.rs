/// Cumulative receive counters for one connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RxStats {
    pub packets: u64,
    pub lines: u64,
}

/// Everything the receive loop reports to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    Line(String),
    Status(String),
    Error(String),
    Stats(RxStats),
}
