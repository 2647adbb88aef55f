use std::sync::Arc;

use htmx_todo::chat::{ChatHub, ConnectionRegistry, ConnectionState};
use htmx_todo::config::ChatConfig;
use tokio::sync::mpsc;

fn hub(echo_to_sender: bool) -> ChatHub {
    ChatHub::new(
        Arc::new(ConnectionRegistry::new()),
        &ChatConfig { echo_to_sender },
    )
}

fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

#[test]
fn three_clients_receive_hi_late_joiner_receives_nothing() {
    let hub = hub(true);
    let (a, mut rx_a) = hub.join();
    let (_b, mut rx_b) = hub.join();
    let (_c, mut rx_c) = hub.join();

    let report = hub.relay_text(a, r#"{"message":"hi"}"#).unwrap();
    assert_eq!(report.attempted, 3);
    assert_eq!(report.delivered, 3);

    for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
        let frames = drain(rx);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].contains("hi"));
    }

    let (_d, mut rx_d) = hub.join();
    assert!(drain(&mut rx_d).is_empty(), "no history replay");
}

#[test]
fn sender_exclusion_attempts_n_minus_one() {
    let hub = hub(false);
    let (a, mut rx_a) = hub.join();
    let (_b, mut rx_b) = hub.join();
    let (_c, mut rx_c) = hub.join();

    let report = hub.relay_text(a, r#"{"message":"hi"}"#).unwrap();
    assert_eq!(report.attempted, 2);
    assert!(drain(&mut rx_a).is_empty());
    assert_eq!(drain(&mut rx_b).len(), 1);
    assert_eq!(drain(&mut rx_c).len(), 1);
}

#[test]
fn failed_recipient_is_removed_and_skipped_afterwards() {
    let hub = hub(false);
    let (a, _rx_a) = hub.join();
    let (b, rx_b) = hub.join();
    let (_c, mut rx_c) = hub.join();

    // B's writer is gone
    drop(rx_b);

    let report = hub.relay_text(a, r#"{"message":"first"}"#).unwrap();
    assert_eq!(report.attempted, 2);
    assert_eq!(report.delivered, 1);
    assert_eq!(report.dropped, vec![b]);
    assert_eq!(hub.registry().state(b), Some(ConnectionState::Closed));

    let report = hub.relay_text(a, r#"{"message":"second"}"#).unwrap();
    assert_eq!(report.attempted, 1);
    assert!(report.dropped.is_empty());

    let frames = drain(&mut rx_c);
    assert_eq!(frames.len(), 2);
    assert!(frames[0].contains("first"));
    assert!(frames[1].contains("second"));
}

#[test]
fn malformed_frame_leaves_everyone_connected() {
    let hub = hub(true);
    let (a, mut rx_a) = hub.join();
    let (b, mut rx_b) = hub.join();

    assert!(hub.relay_text(a, r#"{"msg":"wrong field"}"#).is_err());
    assert!(hub.relay_text(a, "garbage").is_err());
    assert_eq!(hub.registry().len(), 2);

    // Same connection keeps working
    hub.relay_text(a, r#"{"message":"still here"}"#).unwrap();
    assert_eq!(drain(&mut rx_a).len(), 1);
    assert_eq!(drain(&mut rx_b).len(), 1);
    assert_eq!(hub.registry().state(b), Some(ConnectionState::Open));
}

#[test]
fn live_count_tracks_joins_minus_leaves() {
    let hub = hub(true);
    let mut ids = Vec::new();
    let mut receivers = Vec::new();
    for _ in 0..5 {
        let (id, rx) = hub.join();
        ids.push(id);
        receivers.push(rx);
    }
    assert_eq!(hub.registry().len(), 5);

    hub.leave(ids[1]);
    hub.leave(ids[3]);
    hub.leave(ids[3]);
    assert_eq!(hub.registry().len(), 3);

    let report = hub.relay_text(ids[0], r#"{"message":"x"}"#).unwrap();
    assert_eq!(report.attempted, 3);
}

#[tokio::test]
async fn concurrent_joins_and_broadcasts_stay_consistent() {
    let hub = Arc::new(hub(true));
    let mut tasks = Vec::new();

    for _ in 0..16 {
        let hub = hub.clone();
        tasks.push(tokio::spawn(async move {
            let (id, mut rx) = hub.join();
            hub.relay_text(id, r#"{"message":"ping"}"#).unwrap();
            while rx.try_recv().is_ok() {}
            hub.leave(id);
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert!(hub.registry().is_empty());
}
