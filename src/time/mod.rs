//! Timestamp formatting and parsing in a configured zone.
//!
//! A [`TimeConfig`] pairs a reference-timestamp [`Layout`] with an IANA zone
//! name. The zone name is resolved on every call; a name that does not
//! resolve falls back to UTC.

mod layout;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::TimeError;

pub use layout::Layout;

/// Default layout: `YYYY-MM-DD hh:mm:ss`, 24-hour clock, zero-padded.
pub const DEFAULT_LAYOUT: &str = "2006-01-02 15:04:05";

/// Default zone name.
pub const DEFAULT_TIME_ZONE: &str = "Asia/Shanghai";

/// Layout and zone used for every timestamp ↔ text conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeConfig {
    layout: Layout,
    zone: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT, DEFAULT_TIME_ZONE)
    }
}

impl TimeConfig {
    /// Create from a reference-timestamp layout and a zone name.
    pub fn new(layout: &str, zone: impl Into<String>) -> Self {
        Self {
            layout: Layout::new(layout),
            zone: zone.into(),
        }
    }

    /// The layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The zone name as configured (may not resolve).
    pub fn zone_name(&self) -> &str {
        &self.zone
    }

    /// Resolve the zone, falling back to UTC.
    pub fn zone(&self) -> Tz {
        match self.zone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::debug!(zone = %self.zone, "unknown time zone, falling back to UTC");
                Tz::UTC
            }
        }
    }

    /// Render an instant in the configured zone and layout.
    pub fn format(&self, time: &DateTime<Utc>) -> String {
        time.with_timezone(&self.zone())
            .format(self.layout.format_str())
            .to_string()
    }

    /// Parse text in the configured layout, interpreting it in the configured zone.
    ///
    /// An explicit offset in the text wins over the zone. Layouts without a
    /// time of day parse as midnight; layouts without a date use January 1st
    /// of year 0. Ambiguous local times resolve to the earliest instant.
    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>, TimeError> {
        let format = self.layout.format_str();
        let parse_err = |source| TimeError::Parse {
            input: input.to_string(),
            layout: self.layout.to_string(),
            source,
        };

        if self.layout.has_offset() {
            return DateTime::parse_from_str(input, format)
                .map(|t| t.with_timezone(&Utc))
                .map_err(parse_err);
        }

        let naive = match (self.layout.has_date(), self.layout.has_time()) {
            (true, true) => NaiveDateTime::parse_from_str(input, format).map_err(parse_err)?,
            (true, false) => NaiveDate::parse_from_str(input, format)
                .map_err(parse_err)?
                .and_time(NaiveTime::MIN),
            (false, _) => {
                let time = NaiveTime::parse_from_str(input, format).map_err(parse_err)?;
                NaiveDate::from_ymd_opt(0, 1, 1)
                    .unwrap_or(NaiveDate::MIN)
                    .and_time(time)
            }
        };

        self.zone()
            .from_local_datetime(&naive)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .ok_or_else(|| TimeError::Nonexistent {
                input: input.to_string(),
                zone: self.zone.clone(),
            })
    }
}
