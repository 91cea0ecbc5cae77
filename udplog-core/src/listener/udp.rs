use crate::listener::decode::{decode_payload, split_lines};
use crate::listener::error::{BindError, ErrorClass, classify_error};
use crate::listener::event::{ListenerEvent, RxStats};
use crate::listener::target::BindTarget;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::watch;
use tokio::time;

/// Largest payload read from a single datagram.
pub const MAX_DATAGRAM: usize = 65535;

/// Upper bound on how long a pending stop goes unnoticed.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long `stop()` waits for the receive loop before giving up on it.
pub const STOP_WAIT: Duration = Duration::from_millis(800);

/// State of a running listener as seen through its handle.
///
/// Binding happens inside [`Listener::start`] before a handle exists, so a
/// handle starts out `Listening`; a bind failure is the `Err` of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ListenerState {
    Listening = 0,
    Stopping = 1,
    Stopped = 2,
    /// The loop ended on its own because of an unrecoverable error.
    Error = 3,
}

impl ListenerState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Listening,
            1 => Self::Stopping,
            2 => Self::Stopped,
            _ => Self::Error,
        }
    }
}

#[derive(Debug)]
struct SharedState(AtomicU8);

impl SharedState {
    fn new(state: ListenerState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    fn get(&self) -> ListenerState {
        ListenerState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: ListenerState) {
        self.0.store(state as u8, Ordering::Release);
    }

    fn transition(&self, from: ListenerState, to: ListenerState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// UDP line listener.
///
/// The socket is bound on the calling thread so bind failures are returned
/// directly. Receiving then happens on a dedicated thread driving a
/// current-thread Tokio runtime; everything it observes is reported through
/// the event channel.
pub struct Listener;

impl Listener {
    pub fn start(
        target: BindTarget,
        events: Sender<ListenerEvent>,
    ) -> Result<ListenerHandle, BindError> {
        let addr = target.socket_addr();

        let _ = events.send(ListenerEvent::Status(format!("Binding UDP {target} ...")));
        tracing::debug!(bind = %target.addr, port = target.port, "binding udp socket");

        let socket = std::net::UdpSocket::bind(addr).map_err(|e| BindError::from_io(addr, e))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| BindError::from_io(addr, e))?;
        let local_addr = socket.local_addr().unwrap_or(addr);

        let runtime = Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .map_err(BindError::Spawn)?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let state = Arc::new(SharedState::new(ListenerState::Listening));
        let _ = events.send(ListenerEvent::Status(format!("Listening UDP {target}")));
        tracing::info!(bind = %target.addr, port = target.port, "listening");

        thread::Builder::new()
            .name("udp-listener".to_string())
            .spawn({
                let state = state.clone();
                move || {
                    run_receive_thread(runtime, socket, stop_rx, &events, &state);
                    // Dropping the sender is what `stop()` waits for.
                    drop(done_tx);
                }
            })
            .map_err(BindError::Spawn)?;

        Ok(ListenerHandle {
            target,
            local_addr,
            stop_tx,
            done_rx,
            state,
            stop_requested: false,
        })
    }
}

/// Owner side of a running listener.
///
/// Dropping the handle stops the listener.
#[derive(Debug)]
pub struct ListenerHandle {
    target: BindTarget,
    local_addr: SocketAddr,
    stop_tx: watch::Sender<bool>,
    done_rx: mpsc::Receiver<()>,
    state: Arc<SharedState>,
    stop_requested: bool,
}

impl ListenerHandle {
    pub fn target(&self) -> BindTarget {
        self.target
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ListenerState {
        self.state.get()
    }

    /// True once the receive loop has exited, whether asked to or not.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state.get(),
            ListenerState::Stopped | ListenerState::Error
        )
    }

    /// Stop the receive loop and wait (bounded by [`STOP_WAIT`]) for it to
    /// exit. Calling it again has no effect.
    pub fn stop(&mut self) {
        if self.stop_requested {
            return;
        }
        self.stop_requested = true;

        self.state
            .transition(ListenerState::Listening, ListenerState::Stopping);

        // The loop may already be gone; that is fine.
        let _ = self.stop_tx.send(true);

        match self.done_rx.recv_timeout(STOP_WAIT) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!(port = self.target.port, "listener loop exited");
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    port = self.target.port,
                    wait_ms = STOP_WAIT.as_millis() as u64,
                    "listener did not exit in time; continuing without it"
                );
            }
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

enum LoopExit {
    Stopped,
    Failed,
}

enum Wake {
    Stop,
    Idle,
    Ready(io::Result<()>),
}

fn run_receive_thread(
    runtime: Runtime,
    socket: std::net::UdpSocket,
    mut stop_rx: watch::Receiver<bool>,
    events: &Sender<ListenerEvent>,
    state: &SharedState,
) {
    let exit = runtime.block_on(async {
        let socket = match UdpSocket::from_std(socket) {
            Ok(s) => s,
            Err(e) => {
                let _ = events.send(ListenerEvent::Error(format!("UDP listener error: {e}")));
                return LoopExit::Failed;
            }
        };

        // The socket is dropped (closed) when this block returns.
        receive_loop(&socket, &mut stop_rx, events).await
    });

    match exit {
        LoopExit::Stopped => state.set(ListenerState::Stopped),
        LoopExit::Failed => state.set(ListenerState::Error),
    }

    tracing::info!("listener stopped");
    let _ = events.send(ListenerEvent::Status("Listener stopped".to_string()));
}

async fn receive_loop(
    socket: &UdpSocket,
    stop_rx: &mut watch::Receiver<bool>,
    events: &Sender<ListenerEvent>,
) -> LoopExit {
    let mut buf = vec![0u8; MAX_DATAGRAM];
    let mut stats = RxStats::default();

    loop {
        if *stop_rx.borrow() {
            return LoopExit::Stopped;
        }

        let wake = tokio::select! {
            biased;
            // An error here means the handle is gone, which also means stop.
            _ = stop_rx.changed() => Wake::Stop,
            ready = time::timeout(POLL_INTERVAL, socket.readable()) => match ready {
                Ok(r) => Wake::Ready(r),
                Err(_) => Wake::Idle,
            },
        };

        match wake {
            Wake::Stop => return LoopExit::Stopped,
            Wake::Idle => continue,
            Wake::Ready(Err(e)) => {
                if classify_error(&e, *stop_rx.borrow()) == ErrorClass::Benign {
                    return LoopExit::Stopped;
                }
                tracing::error!(error = %e, "readiness wait failed");
                let _ = events.send(ListenerEvent::Error(format!("select failed: {e}")));
                return LoopExit::Failed;
            }
            Wake::Ready(Ok(())) => {}
        }

        match socket.try_recv_from(&mut buf) {
            Ok((n, peer)) => {
                stats.packets += 1;

                let text = decode_payload(&buf[..n]);
                let lines = split_lines(&text);
                stats.lines += lines.len() as u64;

                tracing::trace!(%peer, bytes = n, lines = lines.len(), "datagram received");

                for line in lines {
                    if events.send(ListenerEvent::Line(line)).is_err() {
                        // Consumer is gone; nothing left to deliver to.
                        return LoopExit::Stopped;
                    }
                }
                let _ = events.send(ListenerEvent::Stats(stats));
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => continue,
            Err(e) => match classify_error(&e, *stop_rx.borrow()) {
                ErrorClass::Benign => return LoopExit::Stopped,
                ErrorClass::Reportable => {
                    tracing::warn!(error = %e, "receive failed");
                    let _ = events.send(ListenerEvent::Error(format!("recvfrom failed: {e}")));
                }
            },
        }
    }
}
