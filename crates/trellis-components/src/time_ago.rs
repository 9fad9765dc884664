//! Human-friendly display of how long ago (or until) an event happened.
//!
//! [`format_relative`] renders a timestamp relative to "now" in English
//! ("4 minutes ago", "in a day"), using the conventional fuzzy buckets:
//! anything under 45 seconds is "a few seconds", 45-90 seconds is "a
//! minute", and so on up through years. [`TimeAgo`] pairs the label with a
//! periodic refresh so a mounted label stays current.

use chrono::{DateTime, Utc};

use trellis_core::runtime::{set_interval, IntervalRegistration, RuntimeHandle};

const DEFAULT_REFRESH_MILLIS: u64 = 60_000;

/// Relative-time label for a fixed timestamp.
pub struct TimeAgo {
    time: DateTime<Utc>,
    refresh_millis: u64,
}

impl TimeAgo {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time,
            refresh_millis: DEFAULT_REFRESH_MILLIS,
        }
    }

    /// How often a mounted label re-renders. Defaults to one minute.
    pub fn with_refresh_millis(mut self, refresh_millis: u64) -> Self {
        self.refresh_millis = refresh_millis;
        self
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// The label as of `now`.
    pub fn label(&self, now: DateTime<Utc>) -> String {
        format_relative(self.time, now)
    }

    /// Arms the periodic refresh. `on_refresh` is the owner's re-render
    /// hook; the interval is cancelled when the registration drops.
    pub fn mount(
        &self,
        runtime: &RuntimeHandle,
        on_refresh: impl FnMut() + 'static,
    ) -> IntervalRegistration {
        set_interval(runtime, self.refresh_millis, on_refresh)
    }
}

/// Renders `then` relative to `now`, e.g. "4 minutes ago" or "in an hour".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let future = seconds < 0;
    let phrase = fuzzy_span(seconds.unsigned_abs());
    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn fuzzy_span(seconds: u64) -> String {
    let minutes = div_round(seconds, 60);
    let hours = div_round(minutes, 60);
    let days = div_round(hours, 24);
    let months = div_round(days, 30);
    let years = div_round(days, 365);

    if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{hours} hours")
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        format!("{days} days")
    } else if days < 46 {
        "a month".to_string()
    } else if days < 320 {
        format!("{months} months")
    } else if days < 548 {
        "a year".to_string()
    } else {
        format!("{years} years")
    }
}

fn div_round(value: u64, divisor: u64) -> u64 {
    (value + divisor / 2) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::cell::Cell;
    use std::rc::Rc;
    use trellis_testing::TestRuntime;

    fn at(now: DateTime<Utc>, back: Duration) -> String {
        format_relative(now - back, now)
    }

    #[test]
    fn fuzzy_buckets_match_expectations() {
        let now = Utc::now();
        assert_eq!(at(now, Duration::seconds(10)), "a few seconds ago");
        assert_eq!(at(now, Duration::seconds(60)), "a minute ago");
        assert_eq!(at(now, Duration::minutes(4)), "4 minutes ago");
        assert_eq!(at(now, Duration::minutes(60)), "an hour ago");
        assert_eq!(at(now, Duration::hours(5)), "5 hours ago");
        assert_eq!(at(now, Duration::hours(30)), "a day ago");
        assert_eq!(at(now, Duration::days(10)), "10 days ago");
        assert_eq!(at(now, Duration::days(30)), "a month ago");
        assert_eq!(at(now, Duration::days(90)), "3 months ago");
        assert_eq!(at(now, Duration::days(400)), "a year ago");
        assert_eq!(at(now, Duration::days(900)), "2 years ago");
    }

    #[test]
    fn future_times_render_with_in() {
        let now = Utc::now();
        assert_eq!(format_relative(now + Duration::minutes(5), now), "in 5 minutes");
    }

    #[test]
    fn label_uses_the_configured_time() {
        let now = Utc::now();
        let label = TimeAgo::new(now - Duration::minutes(3)).label(now);
        assert_eq!(label, "3 minutes ago");
    }

    #[test]
    fn mounted_label_refreshes_on_the_interval() {
        let runtime = TestRuntime::new();
        let refreshes = Rc::new(Cell::new(0u32));

        let time_ago = TimeAgo::new(Utc::now()).with_refresh_millis(1_000);
        let registration = {
            let refreshes = Rc::clone(&refreshes);
            time_ago.mount(&runtime.handle(), move || {
                refreshes.set(refreshes.get() + 1)
            })
        };

        runtime.advance(3_500);
        assert_eq!(refreshes.get(), 3);

        drop(registration);
        runtime.advance(10_000);
        assert_eq!(refreshes.get(), 3);
    }
}
