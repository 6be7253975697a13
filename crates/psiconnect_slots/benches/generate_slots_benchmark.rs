use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use psiconnect_config::BookingConfig;
use psiconnect_slots::logic::slot_hash;
use psiconnect_slots::{SelectionCart, SlotGenerator};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()
}

fn benchmark_generate_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_slots");
    let generator = SlotGenerator::from_config(&BookingConfig::default()).unwrap();

    group.bench_function("slot_hash", |b| {
        b.iter(|| slot_hash(black_box("2024-02-15-14:00")))
    });

    group.bench_function("period_0", |b| {
        b.iter(|| generator.available_slots(black_box(0), black_box(reference_date())))
    });

    // Far pages cost the same as near ones
    group.bench_function("period_500_grouped", |b| {
        b.iter(|| generator.available_days(black_box(500), black_box(reference_date())))
    });

    group.bench_function("cart_toggle_cycle", |b| {
        let slots = generator.available_slots(0, reference_date());
        b.iter(|| {
            let mut cart = SelectionCart::from_config(&BookingConfig::default());
            for slot in &slots {
                cart.toggle(slot.date, &slot.time);
            }
            black_box(cart.total())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_generate_slots);
criterion_main!(benches);
