// --- File: crates/psiconnect_checkout/src/receipt.rs ---

use chrono_tz::Tz;
use psiconnect_common::format::{long_date, money};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::CheckoutError;
use crate::logic::PaymentData;

/// Settings the receipt needs besides the payment itself.
#[derive(Debug, Clone)]
pub struct ReceiptSettings {
    pub currency_symbol: String,
    pub unit_price: i64,
    pub time_zone: Tz,
}

/// `comprovante-{order_id}.txt`
pub fn receipt_file_name(order_id: &str) -> String {
    format!("comprovante-{}.txt", order_id)
}

/// Renders the plain-text payment receipt.
pub fn render_receipt(payment: &PaymentData, settings: &ReceiptSettings) -> String {
    let paid_at = payment.timestamp.with_timezone(&settings.time_zone);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "COMPROVANTE DE PAGAMENTO");
    let _ = writeln!(out, "========================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Número do Pedido: {}", payment.order_id);
    let _ = writeln!(out, "Data do Pagamento: {}", long_date(paid_at.date_naive()));
    let _ = writeln!(out, "Horário: {}", paid_at.format("%H:%M"));
    let _ = writeln!(out);
    let _ = writeln!(out, "SESSÕES AGENDADAS:");
    for (index, slot) in payment.sessions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {} às {}", index + 1, long_date(slot.date), slot.time);
        let _ = writeln!(
            out,
            "   Valor: {}",
            money(&settings.currency_symbol, settings.unit_price)
        );
    }
    // two blank lines before the summary
    let _ = writeln!(out);
    let _ = writeln!(out);
    let _ = writeln!(out, "RESUMO DO PAGAMENTO:");
    let _ = writeln!(out, "Total de Sessões: {}", payment.sessions.len());
    let _ = writeln!(
        out,
        "Valor Total: {}",
        money(&settings.currency_symbol, payment.amount)
    );
    let _ = writeln!(out, "Forma de Pagamento: {}", payment.method.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "Status: PAGO ✓");
    let _ = writeln!(out);
    let _ = write!(out, "Obrigado por escolher nossos serviços!");
    out
}

/// Writes the receipt into `dir`, creating the directory when needed.
pub fn write_receipt(
    dir: &Path,
    payment: &PaymentData,
    settings: &ReceiptSettings,
) -> Result<PathBuf, CheckoutError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(receipt_file_name(&payment.order_id));
    fs::write(&path, render_receipt(payment, settings))?;
    info!(path = %path.display(), "Receipt written");
    Ok(path)
}
