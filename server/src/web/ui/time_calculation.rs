use crate::data_store::models::FullShow;
use chrono::{DateTime, Utc};

/// Split the given shows into past shows (starting at or before `now`) and upcoming shows,
/// keeping their order.
pub fn split_past_upcoming(
    shows: Vec<FullShow>,
    now: &DateTime<Utc>,
) -> (Vec<FullShow>, Vec<FullShow>) {
    shows
        .into_iter()
        .partition(|show| show.show.start_time <= *now)
}

/// Human-readable representation of a show's start time in the configured time zone
pub fn format_show_time(start_time: &DateTime<Utc>, time_zone: &chrono_tz::Tz) -> String {
    start_time
        .with_timezone(time_zone)
        .format("%a %b %-d, %Y %-I:%M %p")
        .to_string()
}
