// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Human-readable release ages

use chrono::{DateTime, Datelike, Months, Utc};

/// Calendar difference between two instants
///
/// Whole calendar months are taken first (clamping the day of month when the
/// target month is shorter), the remainder is split into fixed-length units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarDelta {
    pub years: u32,
    pub months: u32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl CalendarDelta {
    /// Delta from `then` to `now`; all zero if `then` is in the future
    #[must_use]
    pub fn between(then: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if then >= now {
            return Self::default();
        }

        let year_diff = i64::from(now.year()) - i64::from(then.year());
        let month_diff = i64::from(now.month()) - i64::from(then.month());
        let mut total_months = u32::try_from(year_diff * 12 + month_diff).unwrap_or(0);

        let mut anchor = add_months(then, total_months);
        while total_months > 0 && anchor.is_none_or(|a| a > now) {
            total_months -= 1;
            anchor = add_months(then, total_months);
        }
        let remainder = now - anchor.unwrap_or(then);

        Self {
            years: total_months / 12,
            months: total_months % 12,
            days: remainder.num_days(),
            hours: remainder.num_hours() % 24,
            minutes: remainder.num_minutes() % 60,
        }
    }
}

fn add_months(dt: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    dt.checked_add_months(Months::new(months))
}

/// Render the age of `then` relative to `now` using the largest unit only
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use release_eol::humanize::duration_ago;
///
/// let now = Utc::now();
/// assert_eq!(duration_ago(now - Duration::days(400), now), "1 year ago");
/// assert_eq!(duration_ago(now - Duration::hours(5), now), "5 hours ago");
/// assert_eq!(duration_ago(now - Duration::seconds(30), now), "just now");
/// ```
#[must_use]
pub fn duration_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = CalendarDelta::between(then, now);

    let (count, unit) = if delta.years > 0 {
        (i64::from(delta.years), "year")
    } else if delta.months > 0 {
        (i64::from(delta.months), "month")
    } else if delta.days > 0 {
        (delta.days, "day")
    } else if delta.hours > 0 {
        (delta.hours, "hour")
    } else if delta.minutes > 0 {
        (delta.minutes, "minute")
    } else {
        return "just now".to_string();
    };

    format!("{count} {unit}{} ago", if count > 1 { "s" } else { "" })
}
