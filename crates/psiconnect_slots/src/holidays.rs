//! Fixed-date holiday calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

use crate::logic::SlotError;

/// Brazilian national holidays for 2024 and 2025.
pub const BRAZILIAN_HOLIDAYS: &[&str] = &[
    "2024-01-01", // Confraternização Universal
    "2024-02-12", // Carnaval
    "2024-02-13", // Carnaval
    "2024-03-29", // Sexta-feira Santa
    "2024-04-21", // Tiradentes
    "2024-05-01", // Dia do Trabalhador
    "2024-09-07", // Independência do Brasil
    "2024-10-12", // Nossa Senhora Aparecida
    "2024-11-02", // Finados
    "2024-11-15", // Proclamação da República
    "2024-12-25", // Natal
    "2025-01-01",
    "2025-03-03",
    "2025-03-04",
    "2025-04-18",
    "2025-04-21",
    "2025-05-01",
    "2025-09-07",
    "2025-10-12",
    "2025-11-02",
    "2025-11-15",
    "2025-12-25",
];

/// Set of dates on which the clinic shows a holiday badge.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// The built-in Brazilian calendar.
    pub fn brazilian() -> Self {
        let dates = BRAZILIAN_HOLIDAYS
            .iter()
            .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .collect();
        Self { dates }
    }

    /// Adds holidays given as YYYY-MM-DD strings.
    pub fn with_extra<S: AsRef<str>>(mut self, extra: &[S]) -> Result<Self, SlotError> {
        for day in extra {
            let day = day.as_ref();
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|_| SlotError::InvalidDate(day.to_string()))?;
            self.dates.insert(date);
        }
        Ok(self)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
