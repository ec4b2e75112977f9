use chrono::{DateTime, Utc};

/// Calendar conversion collaborator for time-like axes.
///
/// A time, run-time, or time-offset axis stores its coordinates as numeric offsets in the axis's
/// declared units (e.g. "hours since 2000-01-01"). The helper converts between those offsets and
/// calendar dates. Axes whose type is not time-like carry no helper, and every calendar operation
/// on them fails with an explicit precondition error.
///
pub trait TimeHelper: Send + Sync {
    /// Numeric offset, in this axis's units, for a calendar date.
    fn offset_from_date(&self, date: DateTime<Utc>) -> f64;

    /// Calendar date for a numeric offset in this axis's units.
    fn date_from_offset(&self, offset: f64) -> DateTime<Utc>;

    /// Calendar dates covered by the offsets `start` through `end`.
    fn date_range(&self, start: f64, end: f64) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.date_from_offset(start), self.date_from_offset(end))
    }

    /// Offset from one date to another, in this axis's units.
    fn offset_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        self.offset_from_date(to) - self.offset_from_date(from)
    }
}
