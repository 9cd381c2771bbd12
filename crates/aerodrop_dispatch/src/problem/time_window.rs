use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed interval `[start, end]` of simulated time.
#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        TimeWindow { start, end }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Both ends are inclusive.
    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time <= self.end
    }

    pub fn starts_after(&self, time: Timestamp) -> bool {
        self.start > time
    }
}

#[derive(Default)]
pub struct TimeWindowBuilder {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindowBuilder {
    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Offsets are minutes relative to `origin`, the way input records express windows.
    /// Returns `None` when either bound falls outside the supported timestamp range.
    pub fn with_minute_offsets(mut self, origin: Timestamp, start: i64, end: i64) -> Option<Self> {
        self.start = Some(offset_by_minutes(origin, start)?);
        self.end = Some(offset_by_minutes(origin, end)?);
        Some(self)
    }

    /// Returns `None` when either bound is missing.
    pub fn build(self) -> Option<TimeWindow> {
        Some(TimeWindow {
            start: self.start?,
            end: self.end?,
        })
    }
}

fn offset_by_minutes(origin: Timestamp, minutes: i64) -> Option<Timestamp> {
    let seconds = minutes.checked_mul(60)?;
    origin.checked_add(SignedDuration::from_secs(seconds)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let start: Timestamp = "2025-06-10T08:00:00Z".parse().unwrap();
        let end: Timestamp = "2025-06-10T10:00:00Z".parse().unwrap();
        let time_window = TimeWindowBuilder::default()
            .with_start(start)
            .with_end(end)
            .build()
            .unwrap();

        assert_eq!(time_window.start(), start);
        assert_eq!(time_window.end(), end);
    }

    #[test]
    fn test_minute_offsets() {
        let origin: Timestamp = "2025-06-10T08:00:00Z".parse().unwrap();
        let time_window = TimeWindowBuilder::default()
            .with_minute_offsets(origin, 15, 45)
            .and_then(TimeWindowBuilder::build)
            .unwrap();

        assert_eq!(time_window.start(), "2025-06-10T08:15:00Z".parse().unwrap());
        assert_eq!(time_window.end(), "2025-06-10T08:45:00Z".parse().unwrap());
    }

    #[test]
    fn test_minute_offsets_out_of_range() {
        let origin: Timestamp = "2025-06-10T08:00:00Z".parse().unwrap();

        assert!(
            TimeWindowBuilder::default()
                .with_minute_offsets(origin, 0, 9_000_000_000)
                .is_none()
        );
        assert!(
            TimeWindowBuilder::default()
                .with_minute_offsets(origin, i64::MIN, 0)
                .is_none()
        );
    }

    #[test]
    fn test_missing_bound() {
        let origin: Timestamp = "2025-06-10T08:00:00Z".parse().unwrap();
        assert!(TimeWindowBuilder::default().with_start(origin).build().is_none());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let start: Timestamp = "2025-06-10T08:00:00Z".parse().unwrap();
        let end: Timestamp = "2025-06-10T09:00:00Z".parse().unwrap();
        let time_window = TimeWindow::new(start, end);

        assert!(time_window.contains(start));
        assert!(time_window.contains(end));
        assert!(!time_window.contains("2025-06-10T09:00:01Z".parse().unwrap()));
        assert!(!time_window.contains("2025-06-10T07:59:59Z".parse().unwrap()));
        assert!(time_window.starts_after("2025-06-10T07:59:59Z".parse().unwrap()));
        assert!(!time_window.starts_after(start));
    }

    #[test]
    fn test_invalid_window() {
        let start: Timestamp = "2025-06-10T09:00:00Z".parse().unwrap();
        let end: Timestamp = "2025-06-10T08:00:00Z".parse().unwrap();
        assert!(!TimeWindow::new(start, end).is_valid());
    }
}
