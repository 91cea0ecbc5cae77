use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Failure to start a listener. Nothing is running when this is returned.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("invalid bind address '{addr}'")]
    InvalidAddress { addr: String },

    #[error("port must be a number between 1 and 65535 (got '{port}')")]
    InvalidPort { port: String },

    #[error("address {addr} is already in use")]
    AddrInUse {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("permission denied binding {addr}")]
    PermissionDenied {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Io {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to start listener thread: {0}")]
    Spawn(#[source] io::Error),
}

impl BindError {
    pub(crate) fn from_io(addr: SocketAddr, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::AddrInUse => Self::AddrInUse { addr, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { addr, source },
            io::ErrorKind::AddrNotAvailable => Self::InvalidAddress {
                addr: addr.ip().to_string(),
            },
            _ => Self::Io { addr, source },
        }
    }
}

/// How the receive loop treats an I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caused by shutdown or a closed socket. Never reported.
    Benign,
    /// Reported as an error event.
    Reportable,
}

#[cfg(unix)]
const CLOSED_SOCKET_CODES: &[i32] = &[
    9,  // EBADF
    22, // EINVAL
];

#[cfg(windows)]
const CLOSED_SOCKET_CODES: &[i32] = &[
    10004, // WSAEINTR
    10022, // WSAEINVAL
    10038, // WSAENOTSOCK
];

#[cfg(not(any(unix, windows)))]
const CLOSED_SOCKET_CODES: &[i32] = &[];

/// Whether `err` is what operating on an already closed socket produces.
pub fn is_closed_socket(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::NotConnected)
        || err
            .raw_os_error()
            .is_some_and(|code| CLOSED_SOCKET_CODES.contains(&code))
}

pub fn classify_error(err: &io::Error, stopping: bool) -> ErrorClass {
    if stopping || is_closed_socket(err) {
        ErrorClass::Benign
    } else {
        ErrorClass::Reportable
    }
}
