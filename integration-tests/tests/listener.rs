use integration_tests::harness::{EventCollector, init_test_tracing, loopback_target, send_datagram};
use pretty_assertions::assert_eq;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use udplog_core::listener::{
    BindError, BindTarget, Listener, ListenerEvent, ListenerState, RxStats, STOP_WAIT,
};

const WAIT: Duration = Duration::from_secs(3);

#[test]
fn datagram_is_split_into_lines() {
    // Arrange
    let (tx, rx) = mpsc::channel();
    let mut handle = Listener::start(loopback_target(), tx).expect("listener should bind");
    let mut events = EventCollector::new(rx);

    // Act
    send_datagram(handle.local_addr(), b"A=1\r\nB=2\r\n");
    let got_stats = events.wait_until(WAIT, |evs| {
        evs.iter().any(|e| matches!(e, ListenerEvent::Stats(_)))
    });
    handle.stop();

    // Assert
    assert!(got_stats, "no stats event within {WAIT:?}");
    assert_eq!(events.lines(), vec!["A=1", "B=2"]);

    let stats = events.events.iter().find_map(|e| match e {
        ListenerEvent::Stats(s) => Some(*s),
        _ => None,
    });
    assert_eq!(stats, Some(RxStats { packets: 1, lines: 2 }));
}

#[test]
fn statuses_announce_binding_and_listening() {
    // Arrange
    let (tx, rx) = mpsc::channel();
    let target = loopback_target();

    // Act
    let mut handle = Listener::start(target, tx).expect("listener should bind");
    handle.stop();
    let mut events = EventCollector::new(rx);
    events.drain();

    // Assert
    assert_eq!(
        events.statuses(),
        vec![
            "Binding UDP 127.0.0.1:0 ...",
            "Listening UDP 127.0.0.1:0",
            "Listener stopped",
        ]
    );
}

#[test]
fn stop_interrupts_pending_receive() {
    // Arrange
    let captured = init_test_tracing();
    let (tx, rx) = mpsc::channel();
    let mut handle = Listener::start(loopback_target(), tx).expect("listener should bind");
    std::thread::sleep(Duration::from_millis(150));

    // Act
    let started = Instant::now();
    handle.stop();
    let elapsed = started.elapsed();

    let mut events = EventCollector::new(rx);
    events.drain();

    // Assert
    assert!(
        elapsed < STOP_WAIT + Duration::from_millis(200),
        "stop took {elapsed:?}"
    );
    assert_eq!(handle.state(), ListenerState::Stopped);
    assert!(events.errors().is_empty(), "unexpected errors: {:?}", events.errors());
    assert_eq!(
        events
            .statuses()
            .iter()
            .filter(|s| **s == "Listener stopped")
            .count(),
        1
    );

    let logged = captured.lock().unwrap();
    assert!(
        logged
            .iter()
            .any(|e| e.message() == Some("listener stopped")),
        "missing 'listener stopped' log event"
    );
}

#[test]
fn second_stop_is_harmless() {
    // Arrange
    let (tx, rx) = mpsc::channel();
    let mut handle = Listener::start(loopback_target(), tx).expect("listener should bind");

    // Act
    handle.stop();
    handle.stop();
    drop(handle);

    let mut events = EventCollector::new(rx);
    events.drain();

    // Assert
    assert!(events.errors().is_empty());
    assert_eq!(
        events
            .statuses()
            .iter()
            .filter(|s| **s == "Listener stopped")
            .count(),
        1
    );
}

#[test]
fn port_in_use_is_a_bind_error() {
    // Arrange
    let (tx1, _rx1) = mpsc::channel();
    let first = Listener::start(loopback_target(), tx1).expect("listener should bind");
    let taken = BindTarget {
        addr: first.local_addr().ip(),
        port: first.local_addr().port(),
    };
    let (tx2, _rx2) = mpsc::channel();

    // Act
    let result = Listener::start(taken, tx2);

    // Assert
    assert!(
        matches!(result, Err(BindError::AddrInUse { .. })),
        "expected AddrInUse, got {:?}",
        result.map(|h| h.local_addr())
    );
}

#[test]
fn dropped_consumer_ends_the_loop() {
    // Arrange
    let (tx, rx) = mpsc::channel();
    let handle = Listener::start(loopback_target(), tx).expect("listener should bind");
    let addr = handle.local_addr();
    drop(rx);

    // Act
    send_datagram(addr, b"nobody listens\n");
    let deadline = Instant::now() + WAIT;
    while !handle.is_finished() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
    }

    // Assert
    assert!(handle.is_finished());
    assert_eq!(handle.state(), ListenerState::Stopped);
}

#[test]
fn handle_reports_listening_until_stopped() {
    // Arrange
    let (tx, _rx) = mpsc::channel();
    let mut handle = Listener::start(loopback_target(), tx).expect("listener should bind");

    // Act
    let running = handle.state();
    handle.stop();

    // Assert
    assert_eq!(running, ListenerState::Listening);
    assert_eq!(handle.state(), ListenerState::Stopped);
    assert!(handle.is_finished());
}
