//! Record change notifications.
//!
//! Stores wrapped in an evented decorator publish a [`RecordEvent`] after
//! every successful mutation. Subscribers (audit logs, caches, tests) read
//! them from an [`EventBroadcaster`].

pub mod broadcaster;
pub mod types;

pub use broadcaster::EventBroadcaster;
pub use types::{RecordEvent, RecordOperation};
