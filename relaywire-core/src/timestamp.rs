//! Unix timestamps in seconds

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn new(seconds: u64) -> Self {
        Timestamp(seconds)
    }

    /// Current wall-clock time, truncated to whole seconds
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Convert to a UTC date-time, `None` if out of chrono's range
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.0).ok()?;
        Utc.timestamp_opt(seconds, 0).single()
    }
}

impl From<u64> for Timestamp {
    fn from(seconds: u64) -> Self {
        Timestamp(seconds)
    }
}

impl From<Timestamp> for u64 {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

/// Dates before the epoch clamp to zero
impl From<DateTime<Utc>> for Timestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Timestamp(u64::try_from(date.timestamp()).unwrap_or(0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_value() {
        assert!(Timestamp::new(1) < Timestamp::new(2));
        assert_eq!(Timestamp::from(1711372078), Timestamp::new(1711372078));
    }

    #[test]
    fn test_datetime_conversion() {
        let ts = Timestamp::new(1711372078);
        let date = ts.to_datetime().unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-25T13:07:58+00:00");
        assert_eq!(Timestamp::from(date), ts);
    }

    #[test]
    fn test_now_is_recent() {
        // 2024-01-01
        assert!(Timestamp::now().as_u64() > 1_704_067_200);
    }

    #[test]
    fn test_serde_is_bare_integer() {
        assert_eq!(serde_json::to_string(&Timestamp::new(42)).unwrap(), "42");
        let ts: Timestamp = serde_json::from_str("1711372078").unwrap();
        assert_eq!(ts.as_u64(), 1711372078);
    }
}
