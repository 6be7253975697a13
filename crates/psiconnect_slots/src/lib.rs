// --- File: crates/psiconnect_slots/src/lib.rs ---
// Declare modules within this crate
pub mod cart;
pub mod holidays;
pub mod logic;
#[cfg(test)]
mod logic_proptest;

pub use cart::{SelectionCart, ToggleOutcome};
pub use holidays::{is_weekend, HolidayCalendar};
pub use logic::{DaySlots, SlotError, SlotGenerator};
