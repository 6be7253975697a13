// --- File: crates/psiconnect_common/src/models.rs ---

// Data structures shared by the slot generator, the cart, the session store
// and checkout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bookable appointment: a calendar day plus a time of day.
///
/// Identity is the (date, time) pair. Slots are never mutated after
/// generation; a reschedule replaces the pair on the session instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    /// Time of day in HH:MM.
    pub time: String,
}

impl Slot {
    pub fn new(date: NaiveDate, time: impl Into<String>) -> Self {
        Self {
            date,
            time: time.into(),
        }
    }

    /// The `"{YYYY-MM-DD}-{HH:MM}"` key, which is also the availability hash seed.
    pub fn key(&self) -> String {
        format!("{}-{}", self.date.format("%Y-%m-%d"), self.time)
    }

    pub fn matches(&self, date: NaiveDate, time: &str) -> bool {
        self.date == date && self.time == time
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.time)
    }
}
