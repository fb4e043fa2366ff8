//! UTC instants used for subscription scores and event stamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Milliseconds since the Unix epoch; the score of a subscription.
    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_lies_between_surrounding_clock_reads() {
        let before = Utc::now().timestamp_millis();
        let ts = Timestamp::now().as_unix_millis();
        let after = Utc::now().timestamp_millis();

        assert!(before <= ts && ts <= after);
    }

    #[test]
    fn millis_match_rfc3339_instant() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T00:00:00Z\"").unwrap();
        assert_eq!(ts.as_unix_millis(), 1_705_276_800_000);
    }
}
