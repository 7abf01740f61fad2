//! # Event channels

use std::{fmt, sync::Arc};

use log::trace;
use parking_lot::Mutex;

mod subscription;


pub use subscription::SubscriptionToken;

use subscription::Subscription;

/// A declared event type: one logical notification stream
///
/// Implementors are marker types, one per stream. The payload type alone
/// does not identify a stream, so two event types may carry the same payload
/// type and still resolve to independent channels.
pub trait Event: Sized + 'static {
    /// Event name in debug messages
    const DEBUG_NAME: &'static str;

    /// Payload data type that will be delivered with this event
    type Payload: 'static;
}

pub(crate) type Callback<P> = Arc<dyn Fn(&P) + Send + Sync>;
pub(crate) type Filter<P> = Arc<dyn Fn(&P) -> bool + Send + Sync>;

type SubscriptionList<E> = Arc<Mutex<Vec<Subscription<E>>>>;

/// The ordered subscriber list for one declared event type
///
/// Obtained from
/// [EventAggregator::get_channel](crate::aggregator::EventAggregator::get_channel).
/// Removal of a subscriber is reached only through the
/// [SubscriptionToken] wired at subscribe time, so a holder of a token can
/// revoke its registration without a reference to the channel.
pub struct EventChannel<E: Event> {
    subscriptions: SubscriptionList<E>,
}

impl<E: Event> EventChannel<E> {
    pub(crate) fn new() -> Self {
        Self {
            subscriptions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers `callback` for every future publish on this channel
    ///
    /// Returns the token that revokes the registration; dropping the token
    /// revokes it as well.
    #[must_use = "dropping the token unsubscribes the callback"]
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionToken
    where
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.attach(Arc::new(callback), None)
    }

    /// Registers `callback` gated by `filter`
    ///
    /// The callback runs only for payloads the filter accepts.
    #[must_use = "dropping the token unsubscribes the callback"]
    pub fn subscribe_filtered<F, P>(&self, callback: F, filter: P) -> SubscriptionToken
    where
        F: Fn(&E::Payload) + Send + Sync + 'static,
        P: Fn(&E::Payload) -> bool + Send + Sync + 'static,
    {
        self.attach(Arc::new(callback), Some(Arc::new(filter)))
    }

    /// Delivers `payload` to every current subscriber in subscription order
    ///
    /// Delivery runs inline on the caller's thread over a snapshot of the
    /// subscriber list taken at call entry: a subscribe or unsubscribe
    /// performed inside a callback affects only later publishes, never the
    /// one in flight. With no subscribers this does nothing.
    pub fn publish(&self, payload: E::Payload) {
        let snapshot = self.subscriptions.lock().clone();
        trace!(
            "publish {} to {} subscriber(s)",
            E::DEBUG_NAME,
            snapshot.len()
        );
        for subscription in &snapshot {
            subscription.deliver(&payload);
        }
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.lock().len()
    }

    fn attach(
        &self,
        callback: Callback<E::Payload>,
        filter: Option<Filter<E::Payload>>,
    ) -> SubscriptionToken {
        let token = SubscriptionToken::create();
        let id = token.id();
        self.subscriptions
            .lock()
            .push(Subscription::new(id, callback, filter));

        // Removal goes through a weak handle; tokens may outlive the channel.
        let list = Arc::downgrade(&self.subscriptions);
        token.bind(move || {
            if let Some(list) = list.upgrade() {
                list.lock().retain(|entry| entry.token_id() != id);
                trace!("unsubscribe {} from {}", id, E::DEBUG_NAME);
            }
        });
        trace!("subscribe {} to {}", id, E::DEBUG_NAME);
        token
    }
}

impl<E: Event> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("event", &E::DEBUG_NAME)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
