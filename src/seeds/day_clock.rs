//! Day keys for daily runs.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use lexit_chain::DayKey;
use tracing::{debug, instrument};

/// Maps instants to day keys in a fixed timezone.
///
/// The day flips at `rollover_hour` local time rather than at midnight:
/// an instant before the rollover belongs to the previous day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    timezone: Tz,
    rollover_hour: u32,
}

impl DayClock {
    /// Creates a clock for `timezone` rolling over at `rollover_hour`.
    pub fn new(timezone: Tz, rollover_hour: u32) -> Self {
        Self {
            timezone,
            rollover_hour,
        }
    }

    /// Timezone the clock reads.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Local hour at which the day key changes.
    pub fn rollover_hour(&self) -> u32 {
        self.rollover_hour
    }

    /// Day key for `now`.
    #[instrument(skip(self))]
    pub fn day_key_at(&self, now: DateTime<Utc>) -> DayKey {
        let local = now.with_timezone(&self.timezone).naive_local();
        let shifted = local - TimeDelta::hours(i64::from(self.rollover_hour));
        let key = DayKey::new(shifted.date());
        debug!(day_key = %key, "Day key computed");
        key
    }

    /// Day key for the current instant.
    pub fn today(&self) -> DayKey {
        self.day_key_at(Utc::now())
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York, 2)
    }
}
