// --- File: crates/psiconnect_slots/src/logic.rs ---
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use psiconnect_common::{PsiError, Slot};
use psiconnect_config::BookingConfig;
use serde::Serialize;
use tracing::debug;

use crate::holidays::{is_weekend, HolidayCalendar};

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Booking configuration error: {0}")]
    ConfigError(String),
}

impl From<SlotError> for PsiError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidTime(_) | SlotError::InvalidDate(_) => {
                PsiError::ValidationError(err.to_string())
            }
            SlotError::ConfigError(_) => {
                PsiError::ConfigError(err.to_string())
            }
        }
    }
}

// --- Data Structures ---

/// Free slots of one calendar day, as shown under a date heading.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub is_holiday: bool,
    pub slots: Vec<Slot>,
}

// --- Availability Logic ---

/// Polynomial rolling hash (`h = h * 31 + unit`) over UTF-16 code units,
/// wrapping at 32 bits.
pub fn slot_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    })
}

/// A hash marks its slot as pre-booked when `|hash| % 10 > threshold`.
pub fn is_booked(hash: i32, threshold: u32) -> bool {
    // widen first: |i32::MIN| does not fit in i32
    (i64::from(hash).abs() % 10) as u32 > threshold
}

pub fn next_period(period: u32) -> u32 {
    period.saturating_add(1)
}

pub fn prev_period(period: u32) -> u32 {
    period.saturating_sub(1)
}

/// Today's date in the given time zone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Checks an HH:MM string.
pub fn parse_time_of_day(time: &str) -> Result<NaiveTime, SlotError> {
    NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| SlotError::InvalidTime(time.to_string()))
}

/// Checks a YYYY-MM-DD string.
pub fn parse_date(date: &str) -> Result<NaiveDate, SlotError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(date.to_string()))
}

/// Produces the bookable slots for a page of calendar days.
///
/// Page `P` covers the days `today + 1 + P*n ..= today + n + P*n` where `n`
/// is `days_per_period`. Weekends are skipped, every remaining day is crossed
/// with the configured times, and pairs whose hash marks them as pre-booked are
/// dropped. The output depends only on the period, the reference date and the
/// configuration.
#[derive(Debug, Clone)]
pub struct SlotGenerator {
    time_slots: Vec<String>,
    days_per_period: u32,
    booked_threshold: u32,
    exclude_holidays: bool,
    holidays: HolidayCalendar,
}

impl SlotGenerator {
    pub fn new(
        time_slots: Vec<String>,
        days_per_period: u32,
        booked_threshold: u32,
        exclude_holidays: bool,
        holidays: HolidayCalendar,
    ) -> Result<Self, SlotError> {
        if time_slots.is_empty() {
            return Err(SlotError::ConfigError("no time slots configured".to_string()));
        }
        if days_per_period == 0 {
            return Err(SlotError::ConfigError(
                "days_per_period must be at least 1".to_string(),
            ));
        }
        for time in &time_slots {
            parse_time_of_day(time)?;
        }
        Ok(Self {
            time_slots,
            days_per_period,
            booked_threshold,
            exclude_holidays,
            holidays,
        })
    }

    /// Builds a generator from the `[booking]` config section.
    pub fn from_config(config: &BookingConfig) -> Result<Self, SlotError> {
        let holidays = HolidayCalendar::brazilian().with_extra(&config.extra_holidays)?;
        Self::new(
            config.time_slots.clone(),
            config.days_per_period,
            config.booked_threshold,
            config.exclude_holidays,
            holidays,
        )
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Inclusive day offsets from the reference date covered by `period`.
    pub fn window(&self, period: u32) -> (i64, i64) {
        let span = i64::from(self.days_per_period);
        let first = 1 + span * i64::from(period);
        (first, first + span - 1)
    }

    /// Whether the day is offered at all (weekday, and not a holiday when those are excluded).
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if is_weekend(date) {
            return false;
        }
        !(self.exclude_holidays && self.holidays.is_holiday(date))
    }

    /// Deterministic stand-in for a booking backend.
    pub fn is_available(&self, slot: &Slot) -> bool {
        !is_booked(slot_hash(&slot.key()), self.booked_threshold)
    }

    /// Flat list of free slots, ordered by date then by configured time order.
    pub fn available_slots(&self, period: u32, today: NaiveDate) -> Vec<Slot> {
        let (first, last) = self.window(period);
        debug!(
            "Generating slots for period {} ({} + {}..={} days)",
            period, today, first, last
        );

        let mut slots = Vec::new();
        for offset in first..=last {
            let Some(date) = today.checked_add_signed(Duration::days(offset)) else {
                break;
            };
            if !self.is_working_day(date) {
                continue;
            }
            for time in &self.time_slots {
                let slot = Slot::new(date, time.as_str());
                if self.is_available(&slot) {
                    slots.push(slot);
                }
            }
        }
        debug!("Period {} offers {} slots", period, slots.len());
        slots
    }

    /// Free slots grouped under their date, holidays flagged.
    pub fn available_days(&self, period: u32, today: NaiveDate) -> Vec<DaySlots> {
        group_by_date(self.available_slots(period, today), &self.holidays)
    }
}

/// Groups an ordered slot list by date, keeping first-seen date order.
pub fn group_by_date(slots: Vec<Slot>, holidays: &HolidayCalendar) -> Vec<DaySlots> {
    let mut days: Vec<DaySlots> = Vec::new();
    for slot in slots {
        match days.last_mut() {
            Some(day) if day.date == slot.date => day.slots.push(slot),
            _ => days.push(DaySlots {
                date: slot.date,
                is_holiday: holidays.is_holiday(slot.date),
                slots: vec![slot],
            }),
        }
    }
    days
}
