//! Extra utilities for use elsewhere in the directory.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// How show start times are displayed, e.g. `05/21/2019, 21:30:00`.
pub const START_TIME_FORMAT: &[FormatItem] =
    format_description!("[month]/[day]/[year], [hour]:[minute]:[second]");

/// The formats accepted from the show form, tried in order.
const START_TIME_INPUT_FORMATS: &[&[FormatItem]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

/// How a start time is pre-filled into the show form.
pub const START_TIME_INPUT_FORMAT: &[FormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn format_start_time(start_time: OffsetDateTime) -> Result<String, time::error::Format> {
    start_time
        .to_offset(UtcOffset::UTC)
        .format(START_TIME_FORMAT)
}

/// Parse a start time typed into the show form. Times are read as UTC.
pub fn parse_start_time(input: &str) -> Option<OffsetDateTime> {
    let input = input.trim();

    START_TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(input, *format).ok())
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn start_times_use_24_hour_clock() {
        let start_time = datetime!(2019-05-21 21:30:00 UTC);
        assert_eq!(format_start_time(start_time).unwrap(), "05/21/2019, 21:30:00");
    }

    #[test]
    fn start_times_are_shown_in_utc() {
        let start_time = datetime!(2035-04-01 20:00:00 -4);
        assert_eq!(format_start_time(start_time).unwrap(), "04/02/2035, 00:00:00");
    }

    #[test]
    fn parses_every_accepted_format() {
        let expected = datetime!(2035-04-01 20:00:00 UTC);
        for input in [
            "2035-04-01 20:00:00",
            "2035-04-01T20:00:00",
            "2035-04-01 20:00",
            " 2035-04-01T20:00 ",
        ] {
            assert_eq!(parse_start_time(input), Some(expected), "input: {input}");
        }
    }

    #[test]
    fn rejects_unparseable_start_times() {
        assert_eq!(parse_start_time(""), None);
        assert_eq!(parse_start_time("tomorrow night"), None);
        assert_eq!(parse_start_time("2035-13-01 20:00"), None);
    }
}
