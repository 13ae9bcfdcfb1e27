//! Schedule item kinds and end-time representations.
//!
//! Items come in two time shapes: absolute instants (personal events,
//! exams, assignments) and weekly recurring slots (classes, a day-of-week
//! plus a local "HH:MM" end time in the operational timezone). The
//! [`ScheduleEnd`] union dispatches the ends-within-window check by shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GroupWatchError, GroupWatchResult};
use crate::window::PollWindow;

/// The four watched schedule-item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    PersonalEvent,
    Exam,
    Assignment,
    Class,
}

impl ItemKind {
    /// Document collection holding items of this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            ItemKind::PersonalEvent => "events",
            ItemKind::Exam => "exams",
            ItemKind::Assignment => "assignments",
            ItemKind::Class => "classes",
        }
    }

    /// Time fields whose changes are notification-worthy for this kind.
    pub fn watched_fields(&self) -> &'static [&'static str] {
        match self {
            ItemKind::PersonalEvent | ItemKind::Exam | ItemKind::Class => {
                &["startTime", "endTime"]
            }
            ItemKind::Assignment => &["dueTime"],
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}

impl FromStr for ItemKind {
    type Err = GroupWatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" => Ok(ItemKind::PersonalEvent),
            "exams" => Ok(ItemKind::Exam),
            "assignments" => Ok(ItemKind::Assignment),
            "classes" => Ok(ItemKind::Class),
            other => Err(GroupWatchError::UnknownItemKind(other.to_string())),
        }
    }
}

/// A weekly recurring class slot. Only the end side matters for the
/// freeing check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySlot {
    /// ISO day of week, 1 = Monday .. 7 = Sunday.
    pub day_of_week: u8,
    /// Local end-of-class time, "HH:MM", in the operational timezone.
    pub ends_at: String,
}

/// A class row as returned by the store: document id plus its slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSlot {
    pub id: String,
    #[serde(flatten)]
    pub slot: WeeklySlot,
}

/// End time of a schedule item: an absolute instant, or a weekly slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEnd {
    Instant(DateTime<Utc>),
    Weekly(WeeklySlot),
}

impl ScheduleEnd {
    /// Whether this item ends inside `window`, bounds included.
    ///
    /// Weekly slots are evaluated against the window's end day in the
    /// operational timezone `tz`: a slot on another weekday never matches,
    /// whatever its end-time string says.
    pub fn ends_within(&self, window: &PollWindow, tz: Tz) -> GroupWatchResult<bool> {
        match self {
            ScheduleEnd::Instant(instant) => Ok(window.contains(*instant)),
            ScheduleEnd::Weekly(slot) => {
                let local_day = window.to.with_timezone(&tz).date_naive();
                if u32::from(slot.day_of_week) != local_day.weekday().number_from_monday() {
                    return Ok(false);
                }

                let time = NaiveTime::parse_from_str(&slot.ends_at, "%H:%M").map_err(|_| {
                    GroupWatchError::InvalidTime(format!(
                        "bad end-of-class time '{}'",
                        slot.ends_at
                    ))
                })?;

                let Some(end) = tz.from_local_datetime(&local_day.and_time(time)).earliest()
                else {
                    // Local time skipped by a DST transition; no end today.
                    warn!(ends_at = %slot.ends_at, timezone = %tz, "class end time does not exist today");
                    return Ok(false);
                };

                Ok(window.contains(end.with_timezone(&Utc)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono_tz::UTC;

    fn window_ending(h: u32, m: u32) -> PollWindow {
        // 2025-03-20 is a Thursday (day 4).
        let to = Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap();
        PollWindow::ending_at(to, Duration::minutes(5))
    }

    fn slot(day_of_week: u8, ends_at: &str) -> ScheduleEnd {
        ScheduleEnd::Weekly(WeeklySlot {
            day_of_week,
            ends_at: ends_at.to_string(),
        })
    }

    #[test]
    fn kind_parses_from_collection_name() {
        assert_eq!("exams".parse::<ItemKind>().unwrap(), ItemKind::Exam);
        assert_eq!(
            "events".parse::<ItemKind>().unwrap(),
            ItemKind::PersonalEvent
        );
        assert!("meetings".parse::<ItemKind>().is_err());
    }

    #[test]
    fn assignments_watch_only_the_due_time() {
        assert_eq!(ItemKind::Assignment.watched_fields(), ["dueTime"]);
        assert_eq!(
            ItemKind::PersonalEvent.watched_fields(),
            ["startTime", "endTime"]
        );
    }

    #[test]
    fn instant_end_respects_window_bounds() {
        let window = window_ending(15, 0);
        let at = |h, m, s| {
            ScheduleEnd::Instant(Utc.with_ymd_and_hms(2025, 3, 20, h, m, s).unwrap())
        };

        assert!(at(15, 0, 0).ends_within(&window, UTC).unwrap());
        assert!(at(14, 55, 0).ends_within(&window, UTC).unwrap());
        assert!(!at(15, 0, 1).ends_within(&window, UTC).unwrap());
        assert!(!at(14, 54, 59).ends_within(&window, UTC).unwrap());
    }

    #[test]
    fn class_on_another_weekday_never_matches() {
        let window = window_ending(15, 0);
        // Monday slot, checked on a Thursday.
        assert!(!slot(1, "14:58").ends_within(&window, UTC).unwrap());
    }

    #[test]
    fn class_today_matches_inclusive_bounds() {
        let window = window_ending(15, 0);

        assert!(slot(4, "15:00").ends_within(&window, UTC).unwrap());
        assert!(slot(4, "14:55").ends_within(&window, UTC).unwrap());
        assert!(!slot(4, "15:01").ends_within(&window, UTC).unwrap());
        assert!(!slot(4, "14:54").ends_within(&window, UTC).unwrap());
    }

    #[test]
    fn class_end_is_interpreted_in_the_operational_timezone() {
        // 13:58 UTC == 14:58 in Madrid (CET, UTC+1 on 2025-01-16, a Thursday).
        let to = Utc.with_ymd_and_hms(2025, 1, 16, 14, 0, 0).unwrap();
        let window = PollWindow::ending_at(to, Duration::minutes(5));
        let madrid: Tz = "Europe/Madrid".parse().unwrap();

        assert!(slot(4, "14:58").ends_within(&window, madrid).unwrap());
        assert!(!slot(4, "14:58").ends_within(&window, UTC).unwrap());
    }

    #[test]
    fn malformed_end_time_is_an_error() {
        let window = window_ending(15, 0);
        assert!(slot(4, "quarter past").ends_within(&window, UTC).is_err());
    }
}
