//! Availability-change detection and notification fan-out for group
//! scheduling.
//!
//! Two entry points compose around one pipeline: the [`poller::Poller`]
//! sweeps every group on a fixed cadence for members who just became free,
//! and the [`watcher::ChangeWatcher`] reacts to schedule-item writes. Both
//! terminate in the [`dispatch::Dispatcher`], which resolves device tokens
//! and issues one batched push per group.
//!
//! Storage and delivery are ports ([`store::ScheduleStore`],
//! [`push::PushGateway`]), injected once at startup. Production
//! implementations speak JSON to external backend binaries (see
//! [`provider`]).

pub mod classifier;
pub mod constants;
pub mod diff;
pub mod dispatch;
pub mod error;
pub mod group;
pub mod poller;
pub mod provider;
pub mod push;
pub mod schedule;
pub mod snapshot;
pub mod store;
pub mod user;
pub mod watcher;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GroupWatchError, GroupWatchResult};
pub use group::Group;
pub use schedule::ItemKind;
pub use user::User;
