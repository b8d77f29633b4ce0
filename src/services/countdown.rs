// src/services/countdown.rs - pure countdown math for the expiry chip

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dtos::post_dtos::PostView;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Under five minutes the chip pulses red.
const URGENT_WINDOW_MS: i64 = 5 * MS_PER_MINUTE;

/// Visual treatment of the chip: pulsing red, orange, grey, or orange
/// without the pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Expired,
    Urgent,
    Normal,
    Forever,
}

/// Remaining-time label. Components are floor-truncated off the raw
/// millisecond delta, never re-derived from already-rounded values.
pub fn time_left(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let expiry = match expiry {
        Some(e) => e,
        None => return "Forever".to_string(),
    };
    let ms = (expiry - now).num_milliseconds();
    if ms <= 0 {
        return "Expired".to_string();
    }
    let days = ms / MS_PER_DAY;
    let hours = (ms % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    if days >= 1 {
        format!("{days}d {hours}h left")
    } else if hours >= 1 {
        format!("{hours}h {minutes}m left")
    } else {
        format!("{minutes}m {seconds}s left")
    }
}

pub fn urgency(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> UrgencyTier {
    let expiry = match expiry {
        Some(e) => e,
        None => return UrgencyTier::Forever,
    };
    let ms = (expiry - now).num_milliseconds();
    if ms <= 0 {
        UrgencyTier::Expired
    } else if ms < URGENT_WINDOW_MS {
        UrgencyTier::Urgent
    } else {
        UrgencyTier::Normal
    }
}

/// One 1-second timer tick: rewrite the countdown chip on already-built
/// views. Touches nothing else, so a missed or repeated tick is harmless.
pub fn refresh(views: &mut [PostView], now: DateTime<Utc>) {
    for view in views {
        view.time_left = time_left(view.expiry, now);
        view.urgency = urgency(view.expiry, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn absent_expiry_is_forever() {
        assert_eq!(time_left(None, now()), "Forever");
        assert_eq!(urgency(None, now()), UrgencyTier::Forever);
    }

    #[test]
    fn past_or_exact_expiry_is_expired() {
        assert_eq!(time_left(Some(now()), now()), "Expired");
        assert_eq!(time_left(Some(now() - Duration::seconds(1)), now()), "Expired");
        assert_eq!(urgency(Some(now()), now()), UrgencyTier::Expired);
    }

    #[test]
    fn future_expiry_is_never_expired() {
        let label = time_left(Some(now() + Duration::milliseconds(1)), now());
        assert_ne!(label, "Expired");
        assert_ne!(label, "Forever");
    }

    #[test]
    fn label_picks_magnitude_bucket() {
        let e = now() + Duration::days(2) + Duration::hours(3) + Duration::minutes(59);
        assert_eq!(time_left(Some(e), now()), "2d 3h left");

        let e = now() + Duration::hours(5) + Duration::minutes(7) + Duration::seconds(59);
        assert_eq!(time_left(Some(e), now()), "5h 7m left");

        let e = now() + Duration::minutes(4) + Duration::seconds(20);
        assert_eq!(time_left(Some(e), now()), "4m 20s left");
    }

    #[test]
    fn components_truncate_from_raw_delta() {
        // 1 day minus 1 ms stays in the hour bucket as 23h 59m
        let e = now() + Duration::days(1) - Duration::milliseconds(1);
        assert_eq!(time_left(Some(e), now()), "23h 59m left");
    }

    #[test]
    fn urgent_window_is_strictly_under_five_minutes() {
        assert_eq!(
            urgency(Some(now() + Duration::minutes(5)), now()),
            UrgencyTier::Normal
        );
        assert_eq!(
            urgency(Some(now() + Duration::minutes(5) - Duration::milliseconds(1)), now()),
            UrgencyTier::Urgent
        );
        assert_eq!(
            urgency(Some(now() + Duration::milliseconds(1)), now()),
            UrgencyTier::Urgent
        );
    }
}
