use chrono::{DateTime, Duration, Utc};

/// Closed time range a search runs over.
///
/// Always the last 24 hours in UTC, recomputed per invocation and never
/// persisted. The lookback is deliberately fixed; no wider range is
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    const LOOKBACK_HOURS: i64 = 24;

    /// Window ending now.
    pub fn last_day() -> Self {
        Self::ending_at(Utc::now())
    }

    /// Window with a pinned end instant. Search results must be
    /// reproducible across calls within a test, so tests construct their
    /// windows through this.
    pub fn ending_at(end: DateTime<Utc>) -> Self {
        Self {
            start: end - Duration::hours(Self::LOOKBACK_HOURS),
            end,
        }
    }
}
