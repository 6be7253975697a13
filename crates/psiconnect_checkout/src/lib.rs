// --- File: crates/psiconnect_checkout/src/lib.rs ---
// Declare modules within this crate
pub mod error;
pub mod logic;
pub mod receipt;
#[cfg(test)]
mod receipt_test;
pub mod service;

pub use error::CheckoutError;
pub use logic::{pix_preview, CardDetails, PaymentData, PaymentMethod, PaymentRequest};
pub use receipt::{receipt_file_name, render_receipt, write_receipt, ReceiptSettings};
pub use service::{BoxFuture, PaymentProcessor, SimulatedPaymentProcessor};
