//! Notification fan-out and device-token resolution.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::GroupWatchResult;
use crate::group::Group;
use crate::push::{Notification, PushGateway};
use crate::store::ScheduleStore;

/// Shared fan-out pipeline: resolves device tokens for a target set and
/// issues one batched delivery per group.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ScheduleStore>,
    gateway: Arc<dyn PushGateway>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ScheduleStore>, gateway: Arc<dyn PushGateway>) -> Self {
        Dispatcher { store, gateway }
    }

    /// Deliver `body` to every target member's devices, titled after the
    /// group. Empty target sets and token-less target sets are no-ops.
    pub async fn fan_out(
        &self,
        group: &Group,
        targets: &[String],
        body: &str,
    ) -> GroupWatchResult<()> {
        if targets.is_empty() {
            debug!(group = %group.display_name(), "no other members to notify");
            return Ok(());
        }

        let tokens = self.resolve_tokens(targets).await?;
        if tokens.is_empty() {
            warn!(group = %group.display_name(), "no device tokens resolved for targets");
            return Ok(());
        }

        let notification = Notification {
            title: format!("Update from {}", group.display_name()),
            body: body.to_string(),
            tokens,
        };
        let outcome = self.gateway.send(&notification).await?;
        info!(
            group = %group.display_name(),
            recipients = targets.len(),
            delivered = outcome.delivered,
            failed = outcome.failed,
            "notification dispatched"
        );
        Ok(())
    }

    /// Union of the users' registered device tokens, deduplicated across
    /// and within users, first-seen order. Missing user documents are
    /// skipped, as are users whose read fails.
    pub async fn resolve_tokens(&self, user_ids: &[String]) -> GroupWatchResult<Vec<String>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        for user_id in user_ids {
            let user = match self.store.user(user_id).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    debug!(user = %user_id, "user document missing, skipping");
                    continue;
                }
                Err(error) => {
                    warn!(user = %user_id, %error, "user read failed, skipping");
                    continue;
                }
            };
            for token in user.device_tokens {
                if seen.insert(token.clone()) {
                    tokens.push(token);
                }
            }
        }
        Ok(tokens)
    }
}
