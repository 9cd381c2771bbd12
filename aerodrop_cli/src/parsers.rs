use jiff::{Timestamp, civil::DateTime, tz::TimeZone};

/// Accepts an RFC 3339 instant (`2025-01-01T08:00:00Z`), a civil date-time read as UTC
/// (`2025-01-01T08:00`) or `now`.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, String> {
    if input.eq_ignore_ascii_case("now") {
        return Ok(Timestamp::now());
    }

    if let Ok(timestamp) = input.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    if let Ok(timestamp) = input
        .parse::<DateTime>()
        .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
    {
        return Ok(timestamp);
    }

    Err(format!("Invalid timestamp: {input}"))
}

/// A count of at least one.
pub fn parse_positive_count(input: &str) -> Result<usize, String> {
    match input.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_owned()),
        Ok(count) => Ok(count),
        Err(err) => Err(format!("Invalid count {input}: {err}")),
    }
}
