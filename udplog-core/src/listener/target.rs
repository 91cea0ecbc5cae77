use crate::listener::error::BindError;
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 10514;

/// Validated `(address, port)` pair a listener binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BindTarget {
    pub addr: IpAddr,
    pub port: u16,
}

impl Default for BindTarget {
    fn default() -> Self {
        Self {
            addr: DEFAULT_BIND_ADDR,
            port: DEFAULT_PORT,
        }
    }
}

impl BindTarget {
    /// Validate user input before any socket is created.
    ///
    /// A blank address means all interfaces. The port must be in
    /// `1..=65535`.
    pub fn parse(addr: &str, port: &str) -> Result<Self, BindError> {
        let addr = addr.trim();
        let addr = if addr.is_empty() {
            DEFAULT_BIND_ADDR
        } else {
            addr.parse::<IpAddr>()
                .map_err(|_| BindError::InvalidAddress {
                    addr: addr.to_string(),
                })?
        };

        let port = match port.trim().parse::<u16>() {
            Ok(p) if p != 0 => p,
            _ => {
                return Err(BindError::InvalidPort {
                    port: port.trim().to_string(),
                });
            }
        };

        Ok(Self { addr, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}
