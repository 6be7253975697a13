// --- File: crates/psiconnect_checkout/src/logic.rs ---

use chrono::{DateTime, Utc};
use psiconnect_common::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CheckoutError;

// --- Data Structures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Card,
}

impl PaymentMethod {
    /// Label printed on the receipt and the success screen.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Card => "Cartão de Crédito",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "card" | "cartao" | "cartão" => Ok(PaymentMethod::Card),
            other => Err(CheckoutError::UnknownMethod(other.to_string())),
        }
    }
}

/// Credit card form, normalised the way the payment screen types it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    /// Digits in groups of four, e.g. `4111 1111 1111 1111`.
    pub number: String,
    /// Upper-cased holder name.
    pub name: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn new(number: &str, name: &str, expiry: &str, cvv: &str) -> Self {
        Self {
            number: format_card_number(number),
            name: name.to_uppercase(),
            expiry: format_expiry(expiry),
            cvv: digits(cvv).chars().take(4).collect(),
        }
    }

    /// First field that keeps the form from being submitted, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.number.len() < 19 {
            Some("número do cartão")
        } else if self.name.chars().count() < 3 {
            Some("nome no cartão")
        } else if self.expiry.len() != 5 {
            Some("validade")
        } else if self.cvv.len() < 3 {
            Some("CVV")
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// `**** **** **** 1111`
    pub fn masked_number(&self) -> String {
        let last: String = digits(&self.number)
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("**** **** **** {}", last)
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Keeps at most 16 digits and groups them by four.
pub fn format_card_number(value: &str) -> String {
    let digits: Vec<char> = digits(value).chars().take(16).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `1227` → `12/27`; fewer than two digits are returned as typed.
pub fn format_expiry(value: &str) -> String {
    let digits = digits(value);
    if digits.len() >= 2 {
        let month = &digits[..2];
        let year: String = digits[2..].chars().take(2).collect();
        format!("{}/{}", month, year)
    } else {
        digits
    }
}

/// What the patient is paying for.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub slots: Vec<Slot>,
    pub unit_price: i64,
    pub method: PaymentMethod,
    pub card: Option<CardDetails>,
}

impl PaymentRequest {
    pub fn amount(&self) -> i64 {
        self.slots.len() as i64 * self.unit_price
    }

    /// PIX is always ready; a card needs every field filled in.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.slots.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        if self.method == PaymentMethod::Card {
            let card = self
                .card
                .as_ref()
                .ok_or_else(|| CheckoutError::IncompleteCard("número do cartão".to_string()))?;
            if let Some(field) = card.missing_field() {
                return Err(CheckoutError::IncompleteCard(field.to_string()));
            }
        }
        Ok(())
    }
}

/// Result of a completed checkout, consumed by the success screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub method: PaymentMethod,
    pub amount: i64,
    pub sessions: Vec<Slot>,
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
}

/// `ORD-{unix millis}`
pub fn order_id_at(now: DateTime<Utc>) -> String {
    format!("ORD-{}", now.timestamp_millis())
}

/// Builds the payment record for an accepted request.
pub fn complete_payment(request: &PaymentRequest, now: DateTime<Utc>) -> PaymentData {
    PaymentData {
        method: request.method,
        amount: request.amount(),
        sessions: request.slots.clone(),
        order_id: order_id_at(now),
        timestamp: now,
    }
}

/// First 50 characters of the PIX payload followed by an ellipsis.
pub fn pix_preview(pix_code: &str) -> String {
    let head: String = pix_code.chars().take(50).collect();
    format!("{}...", head)
}
