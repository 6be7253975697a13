//! Brazilian Portuguese rendering of dates and amounts.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

fn weekday_long(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "seg.",
        Weekday::Tue => "ter.",
        Weekday::Wed => "qua.",
        Weekday::Thu => "qui.",
        Weekday::Fri => "sex.",
        Weekday::Sat => "sáb.",
        Weekday::Sun => "dom.",
    }
}

fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `quinta-feira, 15 de fevereiro de 2024`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {:02} de {} de {}",
        weekday_long(date.weekday()),
        date.day(),
        month_name(date),
        date.year()
    )
}

/// `qui., 15 de fev.`
pub fn compact_date(date: NaiveDate) -> String {
    let month: String = month_name(date).chars().take(3).collect();
    format!(
        "{}, {:02} de {}.",
        weekday_short(date.weekday()),
        date.day(),
        month
    )
}

/// `15/02/2024`
pub fn numeric_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `R$ 150,00`; amounts are whole currency units.
pub fn money(symbol: &str, amount: i64) -> String {
    format!("{} {},00", symbol, amount)
}

/// `1 sessão` / `3 sessões`
pub fn session_count(count: usize) -> String {
    if count == 1 {
        "1 sessão".to_string()
    } else {
        format!("{} sessões", count)
    }
}
