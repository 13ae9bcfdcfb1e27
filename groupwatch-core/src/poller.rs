//! Fixed-cadence availability sweep.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::{debug, error, info, warn};

use crate::classifier::AvailabilityClassifier;
use crate::constants::UNNAMED_MEMBER;
use crate::dispatch::Dispatcher;
use crate::error::GroupWatchResult;
use crate::group::Group;
use crate::store::ScheduleStore;
use crate::window::PollWindow;

/// Scans every group each tick and tells co-members about anyone who just
/// became free.
///
/// Stateless across ticks: freshness comes from the trailing window being
/// tied to the tick's wall-clock time, not from stored flags.
pub struct Poller {
    store: Arc<dyn ScheduleStore>,
    dispatcher: Dispatcher,
    class_tz: Tz,
    window_width: Duration,
}

impl Poller {
    /// `window_width` must equal the tick cadence, so consecutive windows
    /// cover the timeline without skipping activity.
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        dispatcher: Dispatcher,
        class_tz: Tz,
        window_width: Duration,
    ) -> Self {
        Poller {
            store,
            dispatcher,
            class_tz,
            window_width,
        }
    }

    /// One scheduled tick. Never propagates: each group is guarded on its
    /// own, and a failure in one group leaves the others and the next tick
    /// untouched.
    pub async fn tick(&self, now: DateTime<Utc>) {
        let window = PollWindow::ending_at(now, self.window_width);
        debug!(from = %window.from, to = %window.to, "poll tick");

        let groups = match self.store.groups().await {
            Ok(groups) => groups,
            Err(error) => {
                error!(%error, "group listing failed, skipping tick");
                return;
            }
        };

        for group in &groups {
            if let Err(error) = self.sweep_group(group, &window).await {
                error!(group = %group.display_name(), %error, "group sweep failed");
            }
        }
    }

    async fn sweep_group(&self, group: &Group, window: &PollWindow) -> GroupWatchResult<()> {
        if group.members.is_empty() {
            return Ok(());
        }

        let classifier = AvailabilityClassifier::new(self.store.as_ref(), self.class_tz);
        let mut freed_ids: Vec<String> = Vec::new();
        let mut freed_nicks: Vec<String> = Vec::new();

        for member_id in &group.members {
            match classifier.just_became_free(member_id, window).await {
                Ok(true) => {
                    freed_nicks.push(self.nick_of(member_id).await);
                    freed_ids.push(member_id.clone());
                }
                Ok(false) => {}
                Err(error) => {
                    warn!(
                        group = %group.display_name(),
                        user = %member_id,
                        %error,
                        "member check failed, skipping"
                    );
                }
            }
        }

        if freed_ids.is_empty() {
            debug!(group = %group.display_name(), "no members became free");
            return Ok(());
        }

        info!(
            group = %group.display_name(),
            freed = %freed_nicks.join(", "),
            "members just became free"
        );

        let targets: Vec<String> = group
            .members
            .iter()
            .filter(|m| !freed_ids.contains(*m))
            .cloned()
            .collect();
        let body = format!("Now available: {}.", freed_nicks.join(", "));
        self.dispatcher.fan_out(group, &targets, &body).await
    }

    /// Nickname for the freed-members line. A missing or unreadable user
    /// document falls back to the placeholder; the member still counts as
    /// freed so they are not notified about themselves.
    async fn nick_of(&self, user_id: &str) -> String {
        match self.store.user(user_id).await {
            Ok(Some(user)) => user.display_nick().to_string(),
            Ok(None) => UNNAMED_MEMBER.to_string(),
            Err(error) => {
                warn!(user = %user_id, %error, "nickname lookup failed");
                UNNAMED_MEMBER.to_string()
            }
        }
    }
}
