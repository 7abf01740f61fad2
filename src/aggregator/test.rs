use std::{
    sync::{
        atomic::{AtomicUsize, Ordering::SeqCst},
        Arc, Mutex,
    },
    thread,
};

use super::*;

crate::declare! {
    /// Raised once per engine tick
    event Tick(u64);
    /// Line typed by the user
    event ChatLine(String);
    /// Line produced by the system
    event LogLine(String);
}

#[test]
fn get_channel_returns_the_same_instance() {
    let aggregator = EventAggregator::new();
    let first = aggregator.get_channel::<Tick>().unwrap();
    let second = aggregator.get_channel::<Tick>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // a subscription through one handle is visible to a publish through
    // the other
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();
    let _token = first.subscribe(move |_| {
        hits.fetch_add(1, SeqCst);
    });
    second.publish(1);
    assert_eq!(counter.load(SeqCst), 1);
}

#[test]
fn distinct_event_types_with_shared_payload_are_isolated() {
    let aggregator = EventAggregator::new();
    let chat = aggregator.get_channel::<ChatLine>().unwrap();
    let logs = aggregator.get_channel::<LogLine>().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _token = chat.subscribe(move |line: &String| sink.lock().unwrap().push(line.clone()));

    logs.publish("ignored".to_string());
    chat.publish("hello".to_string());

    assert_eq!(*seen.lock().unwrap(), ["hello"]);
    assert_eq!(logs.subscriber_count(), 0);
}

#[test]
fn contains_reports_created_channels() {
    let aggregator = EventAggregator::default();
    assert!(!aggregator.contains::<Tick>());

    let _ = aggregator.get_channel::<Tick>().unwrap();

    assert!(aggregator.contains::<Tick>());
    assert!(!aggregator.contains::<ChatLine>());
}

#[test]
fn channel_handle_outlives_the_registry() {
    let aggregator = EventAggregator::new();
    let channel = aggregator.get_channel::<Tick>().unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();
    let token = channel.subscribe(move |_| {
        hits.fetch_add(1, SeqCst);
    });

    drop(aggregator);
    channel.publish(1);
    assert_eq!(counter.load(SeqCst), 1);

    drop(channel);
    token.unsubscribe();
}

#[test]
fn shared_across_threads() {
    let aggregator = Arc::new(EventAggregator::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let aggregator = aggregator.clone();
            let counter = counter.clone();
            thread::spawn(move || {
                let channel = aggregator.get_channel::<Tick>().unwrap();
                channel.subscribe(move |_| {
                    counter.fetch_add(1, SeqCst);
                })
            })
        })
        .collect();
    let tokens: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    aggregator.get_channel::<Tick>().unwrap().publish(0);
    assert_eq!(counter.load(SeqCst), 4);

    drop(tokens);
    assert_eq!(
        aggregator.get_channel::<Tick>().unwrap().subscriber_count(),
        0
    );
}

#[test]
fn mismatched_entry_surfaces_an_error_not_a_wrong_channel() {
    let aggregator = EventAggregator::new();

    // Forge an entry under Tick's key that is not Tick's channel.
    let bogus: Arc<EventChannel<ChatLine>> = Arc::new(EventChannel::new());
    aggregator.channels.write().insert(id!(Tick), bogus);

    assert_eq!(
        aggregator.get_channel::<Tick>().unwrap_err(),
        AggregatorError::TypeMismatch("Tick")
    );
}
