#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_panics_doc)]

//! Synchronous inter-component event aggregation library
//!
//! Independent components exchange typed notifications without holding
//! references to each other: publishers and subscribers meet on the channel
//! of a declared event type, and delivery happens inline on the publisher's
//! thread, in subscription order, optionally gated by a filter.
//!
//! The [EventAggregator](crate::aggregator::EventAggregator) is an explicit
//! object. Construct one and hand it (or an `Arc` of it) to the components
//! that need it; there is no process-global instance.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! eventcomm::declare! {
//!     /// A randomly picked number
//!     event Random(i32);
//! }
//!
//! let aggregator = eventcomm::EventAggregator::new();
//! let channel = aggregator.get_channel::<Random>().unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let _token = channel.subscribe(move |n| sink.lock().unwrap().push(*n));
//!
//! channel.publish(10);
//! assert_eq!(*seen.lock().unwrap(), [10]);
//! ```

#[macro_use]
mod common;

pub mod aggregator;
pub mod event;

pub use aggregator::{AggregatorError, EventAggregator};
pub use event::{Event, EventChannel, SubscriptionToken};

/// Declare types for [Event](crate::event::Event)
///
/// ## Syntax
///
/// `<visibility>? event <name>(<payload type>);`
///
/// ## Example
///
/// ```rust
/// eventcomm::declare! {
///    /// E1 event
///    event E1(i32);
///    /// E2 event
///    pub(crate) event E2(String);
///    /// E3 event
///    pub event E3(());
/// }
/// ```
#[macro_export]
macro_rules! declare {
    () => {};

    (
        $(#[$attr:meta])*
        $v:vis event $name:ident ($payload:ty);
        $($next:tt)*
    ) => {
        $(#[$attr])*
        $v struct $name;

        impl $crate::event::Event for $name {
            type Payload = $payload;
            const DEBUG_NAME: &'static str = stringify!($name);
        }

        $crate::declare!($($next)*);
    };
}
