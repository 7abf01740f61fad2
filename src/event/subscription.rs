use std::{
    fmt,
    hash::{Hash, Hasher},
};

use parking_lot::Mutex;
use uuid::Uuid;

use super::{Callback, Event, Filter};

/// One entry in a channel's subscriber list
pub(super) struct Subscription<E: Event> {
    token_id: Uuid,
    callback: Callback<E::Payload>,
    filter: Option<Filter<E::Payload>>,
}

impl<E: Event> Subscription<E> {
    pub(super) fn new(
        token_id: Uuid,
        callback: Callback<E::Payload>,
        filter: Option<Filter<E::Payload>>,
    ) -> Self {
        Self {
            token_id,
            callback,
            filter,
        }
    }

    pub(super) fn token_id(&self) -> Uuid {
        self.token_id
    }

    /// Runs the callback unless the filter rejects the payload
    pub(super) fn deliver(&self, payload: &E::Payload) {
        if let Some(filter) = &self.filter {
            if !filter(payload) {
                return;
            }
        }
        (self.callback)(payload);
    }
}

// Derived Clone would demand E: Clone, which marker event types never need.
impl<E: Event> Clone for Subscription<E> {
    fn clone(&self) -> Self {
        Self {
            token_id: self.token_id,
            callback: self.callback.clone(),
            filter: self.filter.clone(),
        }
    }
}

type RemoveFn = Box<dyn FnOnce() + Send>;

/// Handle representing one active subscription
///
/// The token revokes its registration exactly once: through
/// [unsubscribe](SubscriptionToken::unsubscribe) or when the token is
/// dropped, whichever happens first. Either path after the other is a no-op.
pub struct SubscriptionToken {
    id: Uuid,
    remove: Mutex<Option<RemoveFn>>,
}

impl SubscriptionToken {
    pub(super) fn create() -> Self {
        Self {
            id: Uuid::new_v4(),
            remove: Mutex::new(None),
        }
    }

    /// Attaches the removal action; called once by the owning channel right
    /// after the subscriber entry is inserted.
    pub(super) fn bind(&self, remove: impl FnOnce() + Send + 'static) {
        *self.remove.lock() = Some(Box::new(remove));
    }

    /// Unique identifier of this subscription
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Removes the subscription from its channel
    ///
    /// Calling this more than once, or after the owning channel is gone,
    /// does nothing.
    pub fn unsubscribe(&self) {
        let remove = self.remove.lock().take();
        if let Some(remove) = remove {
            remove();
        }
    }
}

impl Drop for SubscriptionToken {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl PartialEq for SubscriptionToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SubscriptionToken {}

impl Hash for SubscriptionToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionToken")
            .field("id", &self.id)
            .finish()
    }
}
