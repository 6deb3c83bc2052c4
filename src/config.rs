//! Process-wide configuration for value-copy.
//!
//! Holds the default timestamp layout and zone used by
//! [`DefaultCoercer::default`](crate::DefaultCoercer). Prefer passing an
//! explicit [`TimeConfig`] via [`ConfigBuilder::build`] and
//! [`DefaultCoercer::new`](crate::DefaultCoercer::new); the global knobs
//! exist for embedders that configure once at startup.
//!
//! Reads take a snapshot. Writes are synchronized, and the last writer wins.
//! A coercer built before a write keeps the snapshot it was built with.

use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::time::{DEFAULT_LAYOUT, DEFAULT_TIME_ZONE, TimeConfig};

/// Global time configuration.
static TIME_CONFIG: LazyLock<RwLock<TimeConfig>> =
    LazyLock::new(|| RwLock::new(TimeConfig::default()));

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    time_layout: Option<String>,
    time_zone: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp layout in reference-timestamp form.
    ///
    /// Default: `"2006-01-02 15:04:05"`
    pub fn time_layout(mut self, layout: impl Into<String>) -> Self {
        self.time_layout = Some(layout.into());
        self
    }

    /// Set the IANA zone name.
    ///
    /// Default: `"Asia/Shanghai"`. Names that do not resolve fall back to UTC
    /// at conversion time.
    pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    /// Build an explicit configuration without touching the global one.
    ///
    /// # Example
    ///
    /// ```
    /// use value_copy::config::ConfigBuilder;
    ///
    /// let config = ConfigBuilder::new().time_zone("UTC").build();
    /// assert_eq!(config.zone_name(), "UTC");
    /// assert_eq!(config.layout().as_str(), "2006-01-02 15:04:05");
    /// ```
    pub fn build(self) -> TimeConfig {
        TimeConfig::new(
            self.time_layout.as_deref().unwrap_or(DEFAULT_LAYOUT),
            self.time_zone
                .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string()),
        )
    }

    /// Build and install as the global configuration.
    ///
    /// Unset options take their defaults, not the previous global values.
    pub fn init(self) {
        *TIME_CONFIG.write() = self.build();
    }
}

/// Snapshot of the global time configuration.
pub fn time_config() -> TimeConfig {
    TIME_CONFIG.read().clone()
}

/// Replace the global layout, keeping the zone.
pub fn set_time_layout(layout: &str) {
    let mut config = TIME_CONFIG.write();
    *config = TimeConfig::new(layout, config.zone_name().to_string());
}

/// Replace the global zone name, keeping the layout.
pub fn set_time_zone(zone: impl Into<String>) {
    let mut config = TIME_CONFIG.write();
    *config = TimeConfig::new(config.layout().as_str(), zone);
}

/// Restore the global defaults.
pub fn reset() {
    *TIME_CONFIG.write() = TimeConfig::default();
}
