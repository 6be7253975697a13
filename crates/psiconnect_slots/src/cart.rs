//! Bounded multi-select of slots the patient intends to book.

use chrono::NaiveDate;
use psiconnect_common::Slot;
use psiconnect_config::BookingConfig;
use serde::Serialize;
use tracing::{debug, warn};

/// What a [`SelectionCart::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The cart was full; nothing changed.
    Rejected,
}

/// Ordered, duplicate-free selection with a fixed capacity.
///
/// Insertion order is display order. The cart never holds more than
/// `capacity` slots and never the same (date, time) twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCart {
    slots: Vec<Slot>,
    capacity: usize,
    unit_price: i64,
}

impl SelectionCart {
    pub fn new(capacity: usize, unit_price: i64) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            unit_price,
        }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.max_selected_slots, config.session_price)
    }

    /// Removes the slot if present, otherwise appends it when there is room.
    pub fn toggle(&mut self, date: NaiveDate, time: &str) -> ToggleOutcome {
        if let Some(index) = self.position(date, time) {
            self.slots.remove(index);
            debug!("Cart: removed {} {} ({}/{})", date, time, self.len(), self.capacity);
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            warn!("Cart: limit of {} reached, ignoring {} {}", self.capacity, date, time);
            return ToggleOutcome::Rejected;
        }
        self.slots.push(Slot::new(date, time));
        debug!("Cart: added {} {} ({}/{})", date, time, self.len(), self.capacity);
        ToggleOutcome::Added
    }

    /// Removes the slot if present; returns whether anything was removed.
    pub fn remove(&mut self, date: NaiveDate, time: &str) -> bool {
        match self.position(date, time) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of selected slots times the unit price.
    pub fn total(&self) -> i64 {
        self.slots.len() as i64 * self.unit_price
    }

    pub fn contains(&self, date: NaiveDate, time: &str) -> bool {
        self.position(date, time).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.slots.len())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }

    fn position(&self, date: NaiveDate, time: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.matches(date, time))
    }
}
