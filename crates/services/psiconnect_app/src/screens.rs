// --- File: crates/services/psiconnect_app/src/screens.rs ---
//! Plain-text rendering of each screen for the terminal.

use psiconnect_common::format::{compact_date, long_date, money, numeric_date, session_count};
use psiconnect_sessions::{IssuanceReport, Session};
use std::fmt::Write as _;

use crate::app_state::AppState;
use crate::navigation::Screen;

const POLICY: &str = "\
Termos e Política de Agendamento

Política de Cancelamento:
  • Cancelamentos gratuitos até 24 horas antes da sessão
  • Cancelamentos com menos de 24h: taxa de 50%
  • Não comparecimento: cobrança integral

Reagendamento:
  • Permitido até 12 horas antes da sessão
  • Máximo de 2 reagendamentos por mês

Sessões Online:
  • Link será enviado 1 hora antes via WhatsApp
  • Teste de conexão recomendado 15 minutos antes

[accept] Aceito os Termos   [reject] Cancelar";

/// Header line with the psychologist, followed by the screen title.
pub fn top_bar(state: &AppState) -> String {
    let screen = state.screen();
    if screen == Screen::Login {
        return "PsiConnect · Entrar".to_string();
    }
    let clinic = &state.config.clinic;
    let mut out = format!("{} · {}", clinic.psychologist, clinic.specialty);
    if let Some(title) = screen.title() {
        let _ = write!(out, "\n== {} ==", title);
    }
    if let Some(subtitle) = screen.subtitle() {
        let _ = write!(out, "\n{}", subtitle);
    }
    out
}

pub fn dashboard(state: &AppState) -> String {
    let currency = &state.config.checkout.currency_symbol;
    let price = state.config.booking.session_price;
    let cart = state.cart();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Horários disponíveis (período {}) · {} por sessão",
        state.period() + 1,
        money(currency, price)
    );
    let days = state.available_days();
    if days.is_empty() {
        let _ = writeln!(out, "  Nenhum horário disponível neste período");
    }
    for day in days {
        let holiday = if day.is_holiday { " (feriado)" } else { "" };
        let _ = writeln!(out, "  {}{}", compact_date(day.date), holiday);
        let times: Vec<String> = day
            .slots
            .iter()
            .map(|slot| {
                if cart.contains(slot.date, &slot.time) {
                    format!("[{}]", slot.time)
                } else {
                    slot.time.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "    {}", times.join("  "));
    }
    let _ = write!(out, "{}", cart_summary(state));
    out
}

pub fn cart_summary(state: &AppState) -> String {
    let currency = &state.config.checkout.currency_symbol;
    let cart = state.cart();
    let mut out = format!(
        "Selecionados: {}/{} · Total: {}",
        cart.len(),
        cart.capacity(),
        money(currency, cart.total())
    );
    for slot in cart.slots() {
        let _ = write!(out, "\n  {} às {}", compact_date(slot.date), slot.time);
    }
    out
}

pub fn confirmation(state: &AppState) -> String {
    if state.navigator().is_policy_open() {
        return POLICY.to_string();
    }
    let currency = &state.config.checkout.currency_symbol;
    let price = state.config.booking.session_price;
    let mut out = String::new();
    for (index, slot) in state.selected_slots().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} às {} · {}",
            index + 1,
            long_date(slot.date),
            slot.time,
            money(currency, price)
        );
    }
    let _ = write!(
        out,
        "{} · Total: {}\n[confirm] Confirmar e pagar   [back] Voltar",
        session_count(state.selected_slots().len()),
        money(currency, state.amount_due())
    );
    out
}

pub fn payment(state: &AppState) -> String {
    let currency = &state.config.checkout.currency_symbol;
    format!(
        "Total a pagar: {} ({})\nPIX copia e cola: {}\n[pay pix] ou [pay card <número> <validade> <cvv> <nome>]",
        money(currency, state.amount_due()),
        session_count(state.selected_slots().len()),
        state.pix_code_preview()
    )
}

pub fn success(state: &AppState) -> String {
    let Some(payment) = state.payment() else {
        return String::new();
    };
    let currency = &state.config.checkout.currency_symbol;
    let mut out = format!(
        "Pagamento Realizado!\nSuas sessões foram agendadas com sucesso\n\nNúmero do Pedido: {}\n",
        payment.order_id
    );
    for (index, slot) in payment.sessions.iter().enumerate() {
        let _ = writeln!(out, "{}. {} · {}", index + 1, long_date(slot.date), slot.time);
    }
    let _ = write!(
        out,
        "Total pago: {} via {}\n[receipt] Baixar comprovante   [home] Voltar ao início",
        money(currency, payment.amount),
        payment.method
    );
    out
}

pub fn session_line(session: &Session) -> String {
    format!(
        "#{} {} {} às {} · {} · {}",
        session.id,
        session.order_number,
        numeric_date(session.date),
        session.time,
        session.session_type,
        session.status.label()
    )
}

pub fn sessions<'a>(state: &AppState, list: impl IntoIterator<Item = &'a Session>) -> String {
    let stats = state.stats();
    let mut out = format!(
        "Próximas: {} · Concluídas: {} · Canceladas: {}",
        stats.upcoming, stats.completed, stats.cancelled
    );
    let mut empty = true;
    for session in list {
        empty = false;
        let _ = write!(out, "\n  {}", session_line(session));
    }
    if empty {
        let _ = write!(out, "\n  Nenhuma sessão encontrada");
    }
    out
}

pub fn session_details(state: &AppState, session: &Session) -> String {
    let currency = &state.config.checkout.currency_symbol;
    let flag = |issued: bool| if issued { "emitida" } else { "pendente" };
    format!(
        "Detalhes da Sessão\nPedido: {}\nData: {} às {}\nProfissional: {} ({})\nTipo: {}\nStatus: {}\nValor: {}\nNota fiscal: {}\nRelatório de frequência: {}",
        session.order_number,
        long_date(session.date),
        session.time,
        session.psychologist,
        session.specialty,
        session.session_type,
        session.status.label(),
        money(currency, session.price),
        flag(session.invoice_issued),
        flag(session.frequency_report_issued)
    )
}

pub fn issuance(report: &IssuanceReport) -> String {
    let mut out = format!(
        "{} enviado para {}",
        report.document_type.label(),
        report.email
    );
    if !report.skipped_ids.is_empty() {
        let skipped: Vec<String> = report.skipped_ids.iter().map(u32::to_string).collect();
        let _ = write!(out, " (ignoradas: {})", skipped.join(", "));
    }
    out
}

/// The view for whatever screen is current.
pub fn render(state: &AppState) -> String {
    let body = match state.screen() {
        Screen::Login => "login <email> <senha>".to_string(),
        Screen::Dashboard => dashboard(state),
        Screen::Sessions => sessions(state, state.session_store().all()),
        Screen::Confirmation => confirmation(state),
        Screen::Payment => payment(state),
        Screen::Success => success(state),
    };
    format!("{}\n\n{}", top_bar(state), body)
}
