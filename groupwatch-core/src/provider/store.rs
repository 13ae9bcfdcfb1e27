//! `ScheduleStore` backed by a provider subprocess.

use async_trait::async_trait;

use crate::error::GroupWatchResult;
use crate::group::Group;
use crate::provider::Provider;
use crate::provider::protocol::{
    GetUser, GroupsWithMember, ListClasses, ListEndedEvents, ListEndedExams, ListGroups,
    ListSubjects, ListTerms,
};
use crate::schedule::ClassSlot;
use crate::store::ScheduleStore;
use crate::user::User;
use crate::window::PollWindow;

/// Document-store port speaking the provider protocol.
#[derive(Clone, Debug)]
pub struct ProviderStore {
    provider: Provider,
}

impl ProviderStore {
    pub fn new(provider: Provider) -> Self {
        ProviderStore { provider }
    }
}

#[async_trait]
impl ScheduleStore for ProviderStore {
    async fn groups(&self) -> GroupWatchResult<Vec<Group>> {
        self.provider.call(ListGroups {}).await
    }

    async fn groups_with_member(&self, user_id: &str) -> GroupWatchResult<Vec<Group>> {
        self.provider
            .call(GroupsWithMember {
                user_id: user_id.to_string(),
            })
            .await
    }

    async fn user(&self, user_id: &str) -> GroupWatchResult<Option<User>> {
        self.provider
            .call(GetUser {
                user_id: user_id.to_string(),
            })
            .await
    }

    async fn events_ending_within(
        &self,
        user_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<Vec<String>> {
        self.provider
            .call(ListEndedEvents {
                user_id: user_id.to_string(),
                from: window.from_rfc3339(),
                to: window.to_rfc3339(),
            })
            .await
    }

    async fn terms(&self, user_id: &str) -> GroupWatchResult<Vec<String>> {
        self.provider
            .call(ListTerms {
                user_id: user_id.to_string(),
            })
            .await
    }

    async fn subjects(&self, user_id: &str, term_id: &str) -> GroupWatchResult<Vec<String>> {
        self.provider
            .call(ListSubjects {
                user_id: user_id.to_string(),
                term_id: term_id.to_string(),
            })
            .await
    }

    async fn exams_ending_within(
        &self,
        user_id: &str,
        term_id: &str,
        subject_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<Vec<String>> {
        self.provider
            .call(ListEndedExams {
                user_id: user_id.to_string(),
                term_id: term_id.to_string(),
                subject_id: subject_id.to_string(),
                from: window.from_rfc3339(),
                to: window.to_rfc3339(),
            })
            .await
    }

    async fn classes(
        &self,
        user_id: &str,
        term_id: &str,
        subject_id: &str,
    ) -> GroupWatchResult<Vec<ClassSlot>> {
        self.provider
            .call(ListClasses {
                user_id: user_id.to_string(),
                term_id: term_id.to_string(),
                subject_id: subject_id.to_string(),
            })
            .await
    }
}
