#[cfg(test)]
mod tests {
    use crate::cart::{SelectionCart, ToggleOutcome};
    use crate::logic::{slot_hash, SlotGenerator};
    use chrono::{Datelike, Duration, NaiveDate, Weekday};
    use proptest::prelude::*;
    use psiconnect_config::BookingConfig;

    const TIMES: [&str; 7] = ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00"];

    // Any reference date between 2020 and roughly 2035
    fn reference_date(day_offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(day_offset)
    }

    proptest! {
        // Slots always land inside [1+5P, 5+5P] and never on a weekend
        #[test]
        fn test_slots_within_window(
            day_offset in 0..5000i64,
            period in 0..200u32,
        ) {
            let generator = SlotGenerator::from_config(&BookingConfig::default()).unwrap();
            let today = reference_date(day_offset);
            let first = today + Duration::days(1 + 5 * i64::from(period));
            let last = today + Duration::days(5 + 5 * i64::from(period));

            for slot in generator.available_slots(period, today) {
                prop_assert!(slot.date >= first && slot.date <= last,
                    "slot {} outside {}..={}", slot, first, last);
                prop_assert!(!matches!(slot.date.weekday(), Weekday::Sat | Weekday::Sun));
                prop_assert!(TIMES.contains(&slot.time.as_str()));
            }
        }

        // Same seed, same hash, same outcome
        #[test]
        fn test_availability_is_deterministic(
            day_offset in 0..5000i64,
            time_index in 0..7usize,
        ) {
            let generator = SlotGenerator::from_config(&BookingConfig::default()).unwrap();
            let slot = psiconnect_common::Slot::new(reference_date(day_offset), TIMES[time_index]);
            prop_assert_eq!(slot_hash(&slot.key()), slot_hash(&slot.key()));
            prop_assert_eq!(generator.is_available(&slot), generator.is_available(&slot));
        }

        // The cart never exceeds its capacity and never holds duplicates,
        // and its total is always len * price
        #[test]
        fn test_cart_invariants(
            toggles in proptest::collection::vec((0..10i64, 0..7usize), 0..60),
        ) {
            let mut cart = SelectionCart::from_config(&BookingConfig::default());
            for (day, time_index) in toggles {
                let date = reference_date(day);
                let was_present = cart.contains(date, TIMES[time_index]);
                let was_full = cart.is_full();
                let outcome = cart.toggle(date, TIMES[time_index]);

                match outcome {
                    ToggleOutcome::Removed => prop_assert!(was_present),
                    ToggleOutcome::Added => prop_assert!(!was_present && !was_full),
                    ToggleOutcome::Rejected => prop_assert!(!was_present && was_full),
                }
                prop_assert!(cart.len() <= 4);
                prop_assert_eq!(cart.total(), cart.len() as i64 * 150);

                let mut keys: Vec<String> = cart.slots().iter().map(|s| s.key()).collect();
                keys.sort();
                keys.dedup();
                prop_assert_eq!(keys.len(), cart.len());
            }
        }

        // Toggling an absent slot twice on a non-full cart restores it
        #[test]
        fn test_double_toggle_restores_cart(
            prefill in proptest::collection::vec((0..10i64, 0..7usize), 0..3),
            day in 10..20i64,
            time_index in 0..7usize,
        ) {
            let mut cart = SelectionCart::from_config(&BookingConfig::default());
            for (d, t) in prefill {
                cart.toggle(reference_date(d), TIMES[t]);
            }
            let before = cart.clone();
            cart.toggle(reference_date(day), TIMES[time_index]);
            cart.toggle(reference_date(day), TIMES[time_index]);
            prop_assert_eq!(cart, before);
        }
    }
}
