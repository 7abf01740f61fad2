//! # Event aggregator

use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::{
    common::{TypeMap, Untyped},
    event::{Event, EventChannel},
};

#[cfg(test)]
mod test;

/// Registry of event channels, keyed by declared event type
///
/// Channels are created lazily on first lookup; every later lookup for the
/// same event type yields a handle to the same channel instance, so a
/// subscription made through one handle is visible to a publish made
/// through another. Channels live as long as the registry or any
/// still-held handle.
///
/// The aggregator is an explicit object: construct one and pass it (or an
/// `Arc` of it) to every component that publishes or subscribes.
pub struct EventAggregator {
    channels: TypeMap,
}

/// This enumeration is the list of the possible error outcomes for the
/// [get_channel](EventAggregator::get_channel) fn
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregatorError {
    /// The registry entry for this event type is not a channel of the
    /// requested concrete type
    #[error("channel registered for `{0}` has a different concrete type")]
    TypeMismatch(&'static str),
}

impl EventAggregator {
    /// Creates an aggregator with no channels
    pub fn new() -> Self {
        Self {
            channels: TypeMap::new(),
        }
    }

    /// Returns the channel for the event type `E`, creating it on first use
    ///
    /// Fails with [TypeMismatch](AggregatorError::TypeMismatch) if the
    /// stored entry cannot be narrowed to a channel of `E`; a wrongly-typed
    /// handle is never returned.
    pub fn get_channel<E: Event>(&self) -> Result<Arc<EventChannel<E>>, AggregatorError> {
        let id = id!(E);

        // fast get with shared access
        if let Some(channel) = self.channels.read().get(&id) {
            return narrow::<E>(channel.clone());
        }

        // slow get with unique access
        let mut channels = self.channels.write();
        if let Some(channel) = channels.get(&id) {
            return narrow::<E>(channel.clone());
        }

        debug!("create channel for {}", E::DEBUG_NAME);
        let channel = Arc::new(EventChannel::<E>::new());
        channels.insert(id, channel.clone());
        Ok(channel)
    }

    /// Returns true if a channel for `E` has already been created
    pub fn contains<E: Event>(&self) -> bool {
        self.channels.read().contains_key(&id!(E))
    }
}

impl Default for EventAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn narrow<E: Event>(channel: Untyped) -> Result<Arc<EventChannel<E>>, AggregatorError> {
    channel
        .downcast::<EventChannel<E>>()
        .map_err(|_| AggregatorError::TypeMismatch(E::DEBUG_NAME))
}
