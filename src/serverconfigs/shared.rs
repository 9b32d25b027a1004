//! Size and duration values shared by several configuration blobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unit of a [`SizeCapacity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    Byte,
    Kb,
    Mb,
    Gb,
    Tb,
    Pb,
}

/// A size such as `{"count": 512, "unit": "kb"}`.
///
/// A negative count means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SizeCapacity {
    pub count: i64,
    #[serde(default)]
    pub unit: SizeUnit,
}

impl SizeCapacity {
    pub const fn unlimited() -> Self {
        Self {
            count: -1,
            unit: SizeUnit::Byte,
        }
    }
}

impl Default for SizeCapacity {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Unit of a [`TimeDuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Ms,
    #[default]
    Second,
    Minute,
    Hour,
    Day,
}

/// A duration such as `{"count": 30, "unit": "second"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TimeDuration {
    pub count: i64,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl TimeDuration {
    pub fn new(count: i64, unit: TimeUnit) -> Self {
        Self { count, unit }
    }

    /// Converts to a std duration. Negative counts have no duration.
    pub fn to_duration(&self) -> Option<Duration> {
        let count = u64::try_from(self.count).ok()?;
        let duration = match self.unit {
            TimeUnit::Ms => Duration::from_millis(count),
            TimeUnit::Second => Duration::from_secs(count),
            TimeUnit::Minute => Duration::from_secs(count.saturating_mul(60)),
            TimeUnit::Hour => Duration::from_secs(count.saturating_mul(3_600)),
            TimeUnit::Day => Duration::from_secs(count.saturating_mul(86_400)),
        };
        Some(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_capacity_defaults_to_unlimited() {
        let size: SizeCapacity = serde_json::from_str(r#"{"count": -1}"#).unwrap();
        assert_eq!(size, SizeCapacity::unlimited());
        assert_eq!(SizeCapacity::default(), size);
    }

    #[test]
    fn test_size_capacity_unit() {
        let size: SizeCapacity = serde_json::from_str(r#"{"count": 2, "unit": "kb"}"#).unwrap();
        assert_eq!(size, SizeCapacity { count: 2, unit: SizeUnit::Kb });

        let size: SizeCapacity = serde_json::from_str(r#"{"count": 512}"#).unwrap();
        assert_eq!(size.unit, SizeUnit::Byte);
    }

    #[test]
    fn test_time_duration() {
        let d = TimeDuration::new(2, TimeUnit::Minute);
        assert_eq!(d.to_duration(), Some(Duration::from_secs(120)));
        assert_eq!(TimeDuration::new(-1, TimeUnit::Second).to_duration(), None);
    }
}
