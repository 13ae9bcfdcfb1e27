//! Document-store port.

use async_trait::async_trait;

use crate::error::GroupWatchResult;
use crate::group::Group;
use crate::schedule::ClassSlot;
use crate::user::User;
use crate::window::PollWindow;

/// Read-only view of the application's document store.
///
/// Range queries are inclusive on both bounds. Implementations serialize
/// their own consistency; the engine never writes.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All groups.
    async fn groups(&self) -> GroupWatchResult<Vec<Group>>;

    /// Groups with `user_id` in their member list.
    async fn groups_with_member(&self, user_id: &str) -> GroupWatchResult<Vec<Group>>;

    /// Point-read of one user document. A missing user is `Ok(None)`.
    async fn user(&self, user_id: &str) -> GroupWatchResult<Option<User>>;

    /// Ids of the user's personal events whose end instant lies in `window`.
    async fn events_ending_within(
        &self,
        user_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<Vec<String>>;

    /// Ids of the user's academic terms.
    async fn terms(&self, user_id: &str) -> GroupWatchResult<Vec<String>>;

    /// Ids of the subjects under one term.
    async fn subjects(&self, user_id: &str, term_id: &str) -> GroupWatchResult<Vec<String>>;

    /// Ids of the exams under one subject whose end instant lies in `window`.
    async fn exams_ending_within(
        &self,
        user_id: &str,
        term_id: &str,
        subject_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<Vec<String>>;

    /// Weekly class slots under one subject.
    async fn classes(
        &self,
        user_id: &str,
        term_id: &str,
        subject_id: &str,
    ) -> GroupWatchResult<Vec<ClassSlot>>;
}
