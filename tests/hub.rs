use std::time::Duration;

use bytes::Bytes;
use streamhub::hub::{Hub, SubscriberId};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::timeout;

fn payload(n: usize) -> Bytes {
    Bytes::from(format!("payload-{n}"))
}

#[tokio::test]
async fn every_subscriber_receives_all_payloads_in_publish_order() {
    let hub = Hub::new(16);
    let mut subs = Vec::new();
    for _ in 0..3 {
        subs.push(hub.subscribe(SubscriberId::fresh()));
    }

    for n in 0..10 {
        hub.publish(payload(n));
    }

    for (delivery, _guard) in subs.iter_mut() {
        for n in 0..10 {
            let got = timeout(Duration::from_millis(100), delivery.recv())
                .await
                .expect("timed out")
                .expect("payload");
            assert_eq!(got, payload(n), "payload {n} out of order");
        }
    }
}

#[tokio::test]
async fn publish_to_zero_subscribers_is_noop() {
    let hub = Hub::with_default_capacity();
    hub.publish(payload(0));

    let metrics = hub.metrics();
    assert_eq!(metrics.subscribers, 0);
    assert_eq!(metrics.published, 1);
    assert_eq!(metrics.dropped, 0);
}

#[tokio::test]
async fn unsubscribed_client_no_longer_receives() {
    let hub = Hub::new(8);
    let (mut delivery_a, guard_a) = hub.subscribe(SubscriberId::fresh());
    let (mut delivery_b, _guard_b) = hub.subscribe(SubscriberId::fresh());

    hub.publish(payload(1));
    assert_eq!(delivery_a.recv().await.unwrap(), payload(1));
    assert_eq!(delivery_b.recv().await.unwrap(), payload(1));

    guard_a.release();
    hub.publish(payload(2));

    assert_eq!(delivery_b.recv().await.unwrap(), payload(2));
    // A's queue is closed; the drain loop observes end-of-stream.
    assert_eq!(delivery_a.recv().await, None);
    assert_eq!(hub.subscriber_count(), 1);
}

#[tokio::test]
async fn second_unsubscribe_on_same_id_is_a_noop() {
    let hub = Hub::new(8);
    let (_delivery, guard) = hub.subscribe(SubscriberId::fresh());
    let id = guard.subscriber_id().clone();

    guard.release();
    assert_eq!(hub.subscriber_count(), 0);

    // Direct second removal of an already-removed id must not panic.
    hub.unsubscribe(&id);
    assert_eq!(hub.subscriber_count(), 0);
}

#[tokio::test]
async fn full_queue_drops_newest_payloads_in_place() {
    let hub = Hub::new(2);
    let (mut delivery, _guard) = hub.subscribe(SubscriberId::fresh());

    hub.publish(payload(1));
    hub.publish(payload(2));
    hub.publish(payload(3)); // queue at capacity: dropped

    assert_eq!(delivery.recv().await.unwrap(), payload(1));
    assert_eq!(delivery.recv().await.unwrap(), payload(2));
    assert!(matches!(delivery.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(hub.metrics().dropped, 1);
}

#[tokio::test]
async fn slow_subscriber_does_not_affect_its_peers() {
    let hub = Hub::new(2);
    let (mut slow, _slow_guard) = hub.subscribe(SubscriberId::fresh());
    let (mut live, _live_guard) = hub.subscribe(SubscriberId::fresh());

    hub.publish(payload(1));
    hub.publish(payload(2));
    // Drain only the live subscriber.
    assert_eq!(live.recv().await.unwrap(), payload(1));
    assert_eq!(live.recv().await.unwrap(), payload(2));

    hub.publish(payload(3));

    // Slow subscriber lost payload 3; the live one still received it.
    assert_eq!(live.recv().await.unwrap(), payload(3));
    assert_eq!(slow.recv().await.unwrap(), payload(1));
    assert_eq!(slow.recv().await.unwrap(), payload(2));
    assert!(matches!(slow.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(hub.metrics().dropped, 1);
}

#[tokio::test]
async fn queue_capacity_is_clamped_to_at_least_one() {
    let hub = Hub::new(0);
    assert_eq!(hub.queue_capacity(), 1);

    let (mut delivery, _guard) = hub.subscribe(SubscriberId::fresh());
    hub.publish(payload(1));
    assert_eq!(delivery.recv().await.unwrap(), payload(1));
}

#[tokio::test]
async fn dropping_the_guard_unregisters_the_subscriber() {
    let hub = Hub::new(4);
    {
        let (_delivery, _guard) = hub.subscribe(SubscriberId::fresh());
        assert_eq!(hub.subscriber_count(), 1);
    }
    assert_eq!(hub.subscriber_count(), 0);
}

#[tokio::test]
async fn concurrent_publishes_preserve_per_subscriber_fifo() {
    let hub = Hub::new(64);
    let (mut delivery, _guard) = hub.subscribe(SubscriberId::fresh());

    // One publisher task; staggered sends establish a deterministic order.
    let publisher = {
        let hub = std::sync::Arc::clone(&hub);
        tokio::spawn(async move {
            for n in 0..20 {
                hub.publish(payload(n));
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
    };

    for n in 0..20 {
        let got = timeout(Duration::from_millis(500), delivery.recv())
            .await
            .expect("timed out")
            .expect("payload");
        assert_eq!(got, payload(n));
    }
    publisher.await.expect("publisher join");
}
