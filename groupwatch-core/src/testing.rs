//! In-memory fakes for the store and gateway ports, shared by the engine
//! tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::UTC;

use crate::error::{GroupWatchError, GroupWatchResult};
use crate::group::Group;
use crate::push::{Notification, PushGateway, PushOutcome};
use crate::schedule::{ClassSlot, ScheduleEnd, WeeklySlot};
use crate::store::ScheduleStore;
use crate::user::User;
use crate::window::PollWindow;

type ScopeKey = (String, String, String);

/// Builder-style fake document store.
#[derive(Default)]
pub struct MemoryStore {
    pub groups: Vec<Group>,
    pub users: HashMap<String, User>,
    /// user id -> (event id, end instant)
    pub events: HashMap<String, Vec<(String, DateTime<Utc>)>>,
    pub terms: HashMap<String, Vec<String>>,
    /// (user, term) -> subject ids
    pub subjects: HashMap<(String, String), Vec<String>>,
    /// (user, term, subject) -> (exam id, end instant)
    pub exams: HashMap<ScopeKey, Vec<(String, DateTime<Utc>)>>,
    pub classes: HashMap<ScopeKey, Vec<ClassSlot>>,
    /// Users whose schedule queries fail.
    pub broken_users: Vec<String>,
    /// Number of `user()` point-reads served.
    pub user_reads: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn with_group(mut self, id: &str, name: Option<&str>, members: &[&str]) -> Self {
        self.groups.push(Group {
            id: id.to_string(),
            name: name.map(|n| n.to_string()),
            members: members.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    pub fn with_user(mut self, id: &str, nick: Option<&str>, tokens: &[&str]) -> Self {
        self.users.insert(
            id.to_string(),
            User {
                id: id.to_string(),
                nick: nick.map(|n| n.to_string()),
                device_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_event(mut self, user: &str, id: &str, ends: DateTime<Utc>) -> Self {
        self.events
            .entry(user.to_string())
            .or_default()
            .push((id.to_string(), ends));
        self
    }

    pub fn with_exam(
        mut self,
        user: &str,
        term: &str,
        subject: &str,
        id: &str,
        ends: DateTime<Utc>,
    ) -> Self {
        self = self.with_subject(user, term, subject);
        self.exams
            .entry((user.to_string(), term.to_string(), subject.to_string()))
            .or_default()
            .push((id.to_string(), ends));
        self
    }

    pub fn with_class(
        mut self,
        user: &str,
        term: &str,
        subject: &str,
        id: &str,
        day_of_week: u8,
        ends_at: &str,
    ) -> Self {
        self = self.with_subject(user, term, subject);
        self.classes
            .entry((user.to_string(), term.to_string(), subject.to_string()))
            .or_default()
            .push(ClassSlot {
                id: id.to_string(),
                slot: WeeklySlot {
                    day_of_week,
                    ends_at: ends_at.to_string(),
                },
            });
        self
    }

    pub fn with_broken_user(mut self, user: &str) -> Self {
        self.broken_users.push(user.to_string());
        self
    }

    fn with_subject(mut self, user: &str, term: &str, subject: &str) -> Self {
        let terms = self.terms.entry(user.to_string()).or_default();
        if !terms.contains(&term.to_string()) {
            terms.push(term.to_string());
        }
        let subjects = self
            .subjects
            .entry((user.to_string(), term.to_string()))
            .or_default();
        if !subjects.contains(&subject.to_string()) {
            subjects.push(subject.to_string());
        }
        self
    }

    fn check(&self, user_id: &str) -> GroupWatchResult<()> {
        if self.broken_users.iter().any(|u| u == user_id) {
            return Err(GroupWatchError::Store(format!(
                "query failed for user '{user_id}'"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn groups(&self) -> GroupWatchResult<Vec<Group>> {
        Ok(self.groups.clone())
    }

    async fn groups_with_member(&self, user_id: &str) -> GroupWatchResult<Vec<Group>> {
        Ok(self
            .groups
            .iter()
            .filter(|g| g.members.iter().any(|m| m == user_id))
            .cloned()
            .collect())
    }

    async fn user(&self, user_id: &str) -> GroupWatchResult<Option<User>> {
        *self.user_reads.lock().unwrap() += 1;
        Ok(self.users.get(user_id).cloned())
    }

    async fn events_ending_within(
        &self,
        user_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<Vec<String>> {
        self.check(user_id)?;
        Ok(self
            .events
            .get(user_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|(_, ends)| {
                        ScheduleEnd::Instant(*ends)
                            .ends_within(window, UTC)
                            .unwrap_or(false)
                    })
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn terms(&self, user_id: &str) -> GroupWatchResult<Vec<String>> {
        self.check(user_id)?;
        Ok(self.terms.get(user_id).cloned().unwrap_or_default())
    }

    async fn subjects(&self, user_id: &str, term_id: &str) -> GroupWatchResult<Vec<String>> {
        Ok(self
            .subjects
            .get(&(user_id.to_string(), term_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn exams_ending_within(
        &self,
        user_id: &str,
        term_id: &str,
        subject_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<Vec<String>> {
        let key = (
            user_id.to_string(),
            term_id.to_string(),
            subject_id.to_string(),
        );
        Ok(self
            .exams
            .get(&key)
            .map(|exams| {
                exams
                    .iter()
                    .filter(|(_, ends)| window.contains(*ends))
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn classes(
        &self,
        user_id: &str,
        term_id: &str,
        subject_id: &str,
    ) -> GroupWatchResult<Vec<ClassSlot>> {
        let key = (
            user_id.to_string(),
            term_id.to_string(),
            subject_id.to_string(),
        );
        Ok(self.classes.get(&key).cloned().unwrap_or_default())
    }
}

/// Gateway fake that records every send.
#[derive(Default)]
pub struct RecordingGateway {
    pub sent: Mutex<Vec<Notification>>,
    /// Titles whose sends fail, for failure-isolation tests.
    pub failing_titles: Vec<String>,
}

impl RecordingGateway {
    pub fn with_failing_title(mut self, title: &str) -> Self {
        self.failing_titles.push(title.to_string());
        self
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(&self, notification: &Notification) -> GroupWatchResult<PushOutcome> {
        if self.failing_titles.iter().any(|t| t == &notification.title) {
            return Err(GroupWatchError::Delivery("gateway unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(PushOutcome {
            delivered: notification.tokens.len(),
            failed: 0,
        })
    }
}
