use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use udplog_core::listener::{BindTarget, ListenerEvent};

/// Loopback target on an ephemeral port chosen at bind time.
pub fn loopback_target() -> BindTarget {
    BindTarget {
        addr: Ipv4Addr::LOCALHOST.into(),
        port: 0,
    }
}

pub fn send_datagram(to: SocketAddr, payload: &[u8]) {
    let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).expect("failed to bind sender");
    socket.send_to(payload, to).expect("send_to failed");
}

/// Collects listener events from a channel with a deadline.
pub struct EventCollector {
    rx: Receiver<ListenerEvent>,
    pub events: Vec<ListenerEvent>,
}

impl EventCollector {
    pub fn new(rx: Receiver<ListenerEvent>) -> Self {
        Self {
            rx,
            events: Vec::new(),
        }
    }

    /// Receive until `done` holds for the collected events or `timeout`
    /// passes. Returns whether `done` was reached.
    pub fn wait_until<F>(&mut self, timeout: Duration, done: F) -> bool
    where
        F: Fn(&[ListenerEvent]) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            if done(&self.events) {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.rx.recv_timeout(remaining) {
                Ok(ev) => self.events.push(ev),
                Err(_) => return done(&self.events),
            }
        }
    }

    /// Take whatever is already queued.
    pub fn drain(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.events.push(ev);
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Line(l) => Some(l.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Status(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Error(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}
