// --- File: crates/psiconnect_checkout/src/service.rs ---
//! Payment processing abstraction.
//!
//! The booking flow only talks to [`PaymentProcessor`], so the simulated
//! processor can be swapped for a mock in tests or a real gateway later.

use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::CheckoutError;
use crate::logic::{complete_payment, PaymentData, PaymentRequest};
use psiconnect_config::SimulationConfig;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Anything that can take a payment for a set of sessions.
pub trait PaymentProcessor: Send + Sync {
    /// Charge the request and return the completed payment record.
    fn process(&self, request: PaymentRequest)
        -> BoxFuture<'static, PaymentData, CheckoutError>;
}

/// Processor that approves every valid request after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedPaymentProcessor {
    delay: Duration,
}

impl SimulatedPaymentProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(Duration::from_millis(config.payment_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl PaymentProcessor for SimulatedPaymentProcessor {
    fn process(
        &self,
        request: PaymentRequest,
    ) -> BoxFuture<'static, PaymentData, CheckoutError> {
        let delay = self.delay;
        debug!(method = %request.method, sessions = request.slots.len(), "Processing payment");
        Box::pin(async move {
            request.validate()?;
            tokio::time::sleep(delay).await;
            let data = complete_payment(&request, Utc::now());
            info!(order_id = %data.order_id, amount = data.amount, "Payment approved");
            Ok(data)
        })
    }
}
