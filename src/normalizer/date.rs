use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// The fixed civil zone all stored timestamps are expressed in (Kyiv, UTC+3).
const TARGET_ZONE_SECS: i32 = 3 * 3600;

pub fn target_zone() -> FixedOffset {
    FixedOffset::east_opt(TARGET_ZONE_SECS).expect("valid fixed offset")
}

/// Where an entry's publication instant came from, in preference order.
/// The feed parser has already turned raw date text into UTC instants;
/// values it could not parse surface as `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    Published(DateTime<Utc>),
    Updated(DateTime<Utc>),
    Absent,
}

impl DateSource {
    pub fn select(published: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> Self {
        match (published, updated) {
            (Some(instant), _) => Self::Published(instant),
            (None, Some(instant)) => Self::Updated(instant),
            (None, None) => Self::Absent,
        }
    }
}

/// Convert a date source into the stored civil timestamp: the instant moved
/// into the target zone with the offset dropped. `Absent` falls back to
/// `now` so ingestion never fails on a missing or unparseable date.
pub fn normalize(source: DateSource, now: DateTime<Utc>) -> NaiveDateTime {
    let instant = match source {
        DateSource::Published(instant) | DateSource::Updated(instant) => instant,
        DateSource::Absent => now,
    };
    instant.with_timezone(&target_zone()).naive_local()
}
