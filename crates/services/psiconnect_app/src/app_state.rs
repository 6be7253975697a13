// --- File: crates/services/psiconnect_app/src/app_state.rs ---
use chrono::NaiveDate;
use chrono_tz::Tz;
use psiconnect_checkout::{
    pix_preview, render_receipt, write_receipt, CardDetails, PaymentData, PaymentMethod,
    PaymentProcessor, PaymentRequest, ReceiptSettings, SimulatedPaymentProcessor,
};
use psiconnect_common::{conflict, validation_error, PsiError, Slot};
use psiconnect_config::AppConfig;
use psiconnect_sessions::{
    DocumentType, IssuanceReport, Session, SessionFilter, SessionStats, SessionStatus,
    SessionStore, SessionType,
};
use psiconnect_slots::logic::{next_period, prev_period, today_in};
use psiconnect_slots::{DaySlots, SelectionCart, SlotGenerator, ToggleOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::navigation::{Event, NavigationError, Navigator, Screen};

/// Everything the terminal driver works on.
///
/// Owned by the driver and passed around as `&mut AppState`; there is no
/// other copy of the cart, the session history or the payment record.
pub struct AppState {
    pub config: Arc<AppConfig>,
    time_zone: Tz,
    generator: SlotGenerator,
    cart: SelectionCart,
    period: u32,
    selected_slots: Vec<Slot>,
    sessions: SessionStore,
    payment: Option<PaymentData>,
    navigator: Navigator,
    processor: Arc<dyn PaymentProcessor>,
    login_delay: Duration,
    /// Fixed reference date; the configured time zone's today when unset.
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, PsiError> {
        config.validate()?;
        let time_zone = config.time_zone()?;
        let generator = SlotGenerator::from_config(&config.booking)?;
        let cart = SelectionCart::from_config(&config.booking);
        let sessions = SessionStore::seeded(&config.clinic);
        let processor = Arc::new(SimulatedPaymentProcessor::from_config(&config.simulation));
        let login_delay = Duration::from_millis(config.simulation.login_delay_ms);

        Ok(Self {
            config: Arc::new(config),
            time_zone,
            generator,
            cart,
            period: 0,
            selected_slots: Vec::new(),
            sessions,
            payment: None,
            navigator: Navigator::new(),
            processor,
            login_delay,
            today: None,
        })
    }

    /// Replace the payment processor, e.g. with a mock.
    pub fn with_processor(mut self, processor: Arc<dyn PaymentProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// Pin the reference date used for the availability window.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| today_in(self.time_zone))
    }

    pub fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn cart(&self) -> &SelectionCart {
        &self.cart
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Slots handed to the confirmation and payment screens.
    pub fn selected_slots(&self) -> &[Slot] {
        &self.selected_slots
    }

    pub fn payment(&self) -> Option<&PaymentData> {
        self.payment.as_ref()
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.sessions
    }

    fn require(&self, screen: Screen, action: &'static str) -> Result<(), PsiError> {
        if self.navigator.screen() == screen {
            Ok(())
        } else {
            Err(NavigationError::InvalidTransition {
                from: self.navigator.screen(),
                event: action,
            }
            .into())
        }
    }

    // --- Login / dashboard ---

    /// Credentials are not checked; both fields only have to be filled in.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Screen, PsiError> {
        self.require(Screen::Login, "login")?;
        if email.trim().is_empty() || password.is_empty() {
            return Err(validation_error("Preencha email e senha"));
        }
        tokio::time::sleep(self.login_delay).await;
        info!("Patient {} logged in", email.trim());
        Ok(self.navigator.handle(&Event::LoggedIn)?)
    }

    /// Free slots of the current period, grouped by day.
    pub fn available_days(&self) -> Vec<DaySlots> {
        self.generator.available_days(self.period, self.today())
    }

    pub fn next_period(&mut self) -> Result<u32, PsiError> {
        self.require(Screen::Dashboard, "next")?;
        self.period = next_period(self.period);
        Ok(self.period)
    }

    /// Stays on period 0 when already there.
    pub fn prev_period(&mut self) -> Result<u32, PsiError> {
        self.require(Screen::Dashboard, "prev")?;
        self.period = prev_period(self.period);
        Ok(self.period)
    }

    /// Adds or removes a slot shown in the current period.
    pub fn toggle(&mut self, date: NaiveDate, time: &str) -> Result<ToggleOutcome, PsiError> {
        self.require(Screen::Dashboard, "toggle")?;
        let slot = Slot::new(date, time);
        let offered = self
            .generator
            .available_slots(self.period, self.today())
            .contains(&slot);
        if !offered && !self.cart.contains(date, time) {
            warn!("Slot {} is not offered in period {}", slot, self.period);
            return Err(validation_error(format!("Horário indisponível: {}", slot)));
        }
        let outcome = self.cart.toggle(date, time);
        if outcome == ToggleOutcome::Rejected {
            warn!("Cart full, {} not added", slot);
        }
        Ok(outcome)
    }

    pub fn remove(&mut self, date: NaiveDate, time: &str) -> Result<bool, PsiError> {
        self.require(Screen::Dashboard, "remove")?;
        Ok(self.cart.remove(date, time))
    }

    // --- Confirmation / payment ---

    pub fn schedule(&mut self) -> Result<Screen, PsiError> {
        let slots = self.cart.slots().to_vec();
        let screen = self
            .navigator
            .handle(&Event::ScheduleAppointment(slots.clone()))?;
        self.selected_slots = slots;
        Ok(screen)
    }

    pub fn request_confirm(&mut self) -> Result<Screen, PsiError> {
        Ok(self.navigator.handle(&Event::RequestConfirm)?)
    }

    pub fn accept_policy(&mut self) -> Result<Screen, PsiError> {
        Ok(self.navigator.handle(&Event::AcceptPolicy)?)
    }

    pub fn reject_policy(&mut self) -> Result<Screen, PsiError> {
        Ok(self.navigator.handle(&Event::RejectPolicy)?)
    }

    /// Amount due for the selected slots.
    pub fn amount_due(&self) -> i64 {
        self.selected_slots.len() as i64 * self.config.booking.session_price
    }

    pub fn pix_code_preview(&self) -> String {
        pix_preview(&self.config.checkout.pix_code)
    }

    /// Runs the payment and, on success, books the sessions and shows the
    /// success screen.
    pub async fn pay(
        &mut self,
        method: PaymentMethod,
        card: Option<CardDetails>,
    ) -> Result<&PaymentData, PsiError> {
        self.require(Screen::Payment, "pay")?;
        let request = PaymentRequest {
            slots: self.selected_slots.clone(),
            unit_price: self.config.booking.session_price,
            method,
            card,
        };
        let data = self.processor.process(request).await?;
        self.navigator
            .handle(&Event::PaymentCompleted(data.clone()))?;

        let ids = self.sessions.book(
            &data.sessions,
            SessionType::Online,
            self.config.booking.session_price,
            &self.config.clinic,
        );
        info!("Order {} booked as sessions {:?}", data.order_id, ids);
        Ok(&*self.payment.insert(data))
    }

    fn receipt_settings(&self) -> ReceiptSettings {
        ReceiptSettings {
            currency_symbol: self.config.checkout.currency_symbol.clone(),
            unit_price: self.config.booking.session_price,
            time_zone: self.time_zone,
        }
    }

    pub fn receipt(&self) -> Result<String, PsiError> {
        let payment = self
            .payment
            .as_ref()
            .ok_or(psiconnect_checkout::CheckoutError::NoPayment)?;
        Ok(render_receipt(payment, &self.receipt_settings()))
    }

    /// Writes the receipt to `checkout.receipt_dir`, or to `dir` when given.
    pub fn save_receipt(&self, dir: Option<&Path>) -> Result<PathBuf, PsiError> {
        let payment = self
            .payment
            .as_ref()
            .ok_or(psiconnect_checkout::CheckoutError::NoPayment)?;
        let dir = dir.unwrap_or_else(|| Path::new(&self.config.checkout.receipt_dir));
        Ok(write_receipt(dir, payment, &self.receipt_settings())?)
    }

    pub fn back_to_home(&mut self) -> Result<Screen, PsiError> {
        let screen = self.navigator.handle(&Event::BackToHome)?;
        self.cart.clear();
        self.selected_slots.clear();
        self.payment = None;
        Ok(screen)
    }

    // --- Common navigation ---

    pub fn back(&mut self) -> Result<Screen, PsiError> {
        Ok(self.navigator.handle(&Event::Back)?)
    }

    pub fn my_sessions(&mut self) -> Result<Screen, PsiError> {
        Ok(self.navigator.handle(&Event::MySessions)?)
    }

    pub fn logout(&mut self) -> Result<Screen, PsiError> {
        let screen = self.navigator.handle(&Event::Logout)?;
        self.cart.clear();
        self.selected_slots.clear();
        self.payment = None;
        info!("Patient logged out");
        Ok(screen)
    }

    // --- Session history ---

    pub fn sessions(&self, filter: SessionFilter) -> Result<Vec<&Session>, PsiError> {
        self.require(Screen::Sessions, "sessions")?;
        Ok(self.sessions.filter(filter))
    }

    pub fn stats(&self) -> SessionStats {
        self.sessions.stats()
    }

    pub fn session_details(&self, id: u32) -> Result<&Session, PsiError> {
        self.require(Screen::Sessions, "details")?;
        Ok(self.sessions.get(id)?)
    }

    /// Only confirmed sessions can move, to a future day and one of the
    /// configured times.
    pub fn reschedule(
        &mut self,
        id: u32,
        new_date: NaiveDate,
        new_time: &str,
    ) -> Result<&Session, PsiError> {
        self.require(Screen::Sessions, "reschedule")?;
        if self.sessions.get(id)?.status != SessionStatus::Confirmed {
            return Err(conflict("Apenas sessões confirmadas podem ser reagendadas"));
        }
        let known_time = self.generator.time_slots().iter().any(|t| t == new_time);
        if new_date <= self.today() || !known_time {
            return Err(validation_error("Selecione uma data e horário válidos"));
        }
        Ok(self.sessions.reschedule(id, new_date, new_time)?)
    }

    pub fn cancel(&mut self, id: u32) -> Result<&Session, PsiError> {
        self.require(Screen::Sessions, "cancel")?;
        Ok(self.sessions.cancel(id)?)
    }

    pub fn eligible(&self, document: DocumentType) -> Result<Vec<&Session>, PsiError> {
        self.require(Screen::Sessions, "eligible")?;
        Ok(self.sessions.eligible_for(document))
    }

    pub fn issue_documents(
        &mut self,
        ids: &[u32],
        document: DocumentType,
        email: &str,
        confirm_email: &str,
    ) -> Result<IssuanceReport, PsiError> {
        self.require(Screen::Sessions, "issue")?;
        Ok(self
            .sessions
            .issue_documents(ids, document, email, confirm_email)?)
    }
}
