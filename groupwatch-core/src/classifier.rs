//! Per-member availability classification.

use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::GroupWatchResult;
use crate::schedule::ScheduleEnd;
use crate::store::ScheduleStore;
use crate::window::PollWindow;

/// Decides whether a member just transitioned from busy to free.
///
/// Schedule sources are checked in priority order with a short-circuit on
/// the first item ending inside the window: personal events, then exams,
/// then weekly classes. Assignments carry a due time rather than a busy
/// period and are never consulted here.
pub struct AvailabilityClassifier<'a> {
    store: &'a dyn ScheduleStore,
    class_tz: Tz,
}

impl<'a> AvailabilityClassifier<'a> {
    pub fn new(store: &'a dyn ScheduleStore, class_tz: Tz) -> Self {
        AvailabilityClassifier { store, class_tz }
    }

    /// True when any of the member's schedule items ended inside `window`.
    pub async fn just_became_free(
        &self,
        user_id: &str,
        window: &PollWindow,
    ) -> GroupWatchResult<bool> {
        let events = self.store.events_ending_within(user_id, window).await?;
        if let Some(event_id) = events.first() {
            debug!(user = %user_id, event = %event_id, "personal event just ended");
            return Ok(true);
        }

        let terms = self.store.terms(user_id).await?;

        for term_id in &terms {
            for subject_id in self.store.subjects(user_id, term_id).await? {
                let exams = self
                    .store
                    .exams_ending_within(user_id, term_id, &subject_id, window)
                    .await?;
                if let Some(exam_id) = exams.first() {
                    debug!(user = %user_id, subject = %subject_id, exam = %exam_id, "exam just ended");
                    return Ok(true);
                }
            }
        }

        for term_id in &terms {
            for subject_id in self.store.subjects(user_id, term_id).await? {
                for class in self.store.classes(user_id, term_id, &subject_id).await? {
                    let end = ScheduleEnd::Weekly(class.slot.clone());
                    match end.ends_within(window, self.class_tz) {
                        Ok(true) => {
                            debug!(user = %user_id, class = %class.id, "class just ended");
                            return Ok(true);
                        }
                        Ok(false) => {}
                        Err(error) => {
                            warn!(
                                user = %user_id,
                                class = %class.id,
                                %error,
                                "skipping class with unreadable end time"
                            );
                        }
                    }
                }
            }
        }

        Ok(false)
    }
}
