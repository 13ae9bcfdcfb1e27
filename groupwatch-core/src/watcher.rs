//! Document-write change handling.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constants::UNNAMED_MEMBER;
use crate::diff::ItemDiff;
use crate::dispatch::Dispatcher;
use crate::error::GroupWatchResult;
use crate::schedule::ItemKind;
use crate::snapshot::ItemSnapshot;
use crate::store::ScheduleStore;

/// A create, update, or delete observed on one schedule-item document.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub user_id: String,
    pub kind: ItemKind,
    pub before: Option<ItemSnapshot>,
    pub after: Option<ItemSnapshot>,
}

/// Reacts to schedule-item writes: decides whether the change is
/// notification-worthy and tells the owner's groups.
pub struct ChangeWatcher {
    store: Arc<dyn ScheduleStore>,
    dispatcher: Dispatcher,
}

impl ChangeWatcher {
    pub fn new(store: Arc<dyn ScheduleStore>, dispatcher: Dispatcher) -> Self {
        ChangeWatcher { store, dispatcher }
    }

    /// Handle one document write. An error here ends only this invocation;
    /// the engine never retries.
    pub async fn handle(&self, event: ChangeEvent) -> GroupWatchResult<()> {
        let watched = event.kind.watched_fields();
        let Some(diff) = ItemDiff::detect(watched, event.before.as_ref(), event.after.as_ref())
        else {
            debug!(user = %event.user_id, kind = %event.kind, "change not notification-worthy");
            return Ok(());
        };

        info!(user = %event.user_id, kind = %event.kind, change = %diff, "schedule item changed");

        let nick = match self.store.user(&event.user_id).await? {
            Some(user) => user.display_nick().to_string(),
            None => UNNAMED_MEMBER.to_string(),
        };
        let body =
            format!("{nick} has updated their calendar. Their availability may have changed.");

        let groups = self.store.groups_with_member(&event.user_id).await?;
        if groups.is_empty() {
            debug!(user = %event.user_id, "user shares no groups");
            return Ok(());
        }

        for group in &groups {
            let targets = group.members_except(&event.user_id);
            if targets.is_empty() {
                continue;
            }
            if let Err(error) = self.dispatcher.fan_out(group, &targets, &body).await {
                warn!(group = %group.display_name(), %error, "fan-out failed");
            }
        }
        Ok(())
    }
}
