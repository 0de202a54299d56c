//! Completion lifecycle rule for todos.
//!
//! A todo moves between two states, open and completed, via the
//! `completed` flag on update. The first transition to completed stamps
//! `completed_at` and the elapsed open time; the stamp is permanent.
//! Re-completing never recomputes it and reopening never clears it.

use crate::types::Timestamp;

/// The pair of values written when a todo is completed for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStamp {
    /// Instant the todo was first marked completed.
    pub completed_at: Timestamp,
    /// Whole seconds between creation and first completion.
    pub time_open_secs: i64,
}

/// Decide whether an update marks the todo completed for the first time.
///
/// Returns `Some` exactly when `completed` is requested and no stamp
/// exists yet; `completed_at` is then `now` and `time_open_secs` is
/// `now - created_at` truncated to whole seconds. Every other combination
/// (still open, already stamped, reopening) returns `None`, leaving any
/// existing stamp untouched.
pub fn completion_stamp(
    completed: bool,
    created_at: Timestamp,
    completed_at: Option<Timestamp>,
    now: Timestamp,
) -> Option<CompletionStamp> {
    if !completed || completed_at.is_some() {
        return None;
    }

    Some(CompletionStamp {
        completed_at: now,
        time_open_secs: (now - created_at).num_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn instant(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn first_completion_stamps_now_and_elapsed_seconds() {
        let created = instant(0);
        let now = instant(3600);

        let stamp = completion_stamp(true, created, None, now).unwrap();

        assert_eq!(stamp.completed_at, now);
        assert_eq!(stamp.time_open_secs, 3600);
    }

    #[test]
    fn still_open_is_a_noop() {
        assert_eq!(completion_stamp(false, instant(0), None, instant(60)), None);
    }

    #[test]
    fn repeated_completion_does_not_recompute() {
        let created = instant(0);
        let first = instant(100);

        // A later completion request with the stamp already present
        // must not produce a new stamp.
        assert_eq!(
            completion_stamp(true, created, Some(first), instant(5000)),
            None
        );
    }

    #[test]
    fn reopening_leaves_the_stamp_alone() {
        let created = instant(0);
        let first = instant(100);

        assert_eq!(
            completion_stamp(false, created, Some(first), instant(200)),
            None
        );
    }

    #[test]
    fn sub_second_elapsed_time_truncates_to_whole_seconds() {
        let created = instant(0);
        let now = instant(90) + Duration::milliseconds(700);

        let stamp = completion_stamp(true, created, None, now).unwrap();

        assert_eq!(stamp.time_open_secs, 90);
    }

    #[test]
    fn zero_elapsed_time_is_zero_seconds() {
        let created = instant(0);

        let stamp = completion_stamp(true, created, None, created).unwrap();

        assert_eq!(stamp.time_open_secs, 0);
    }
}
