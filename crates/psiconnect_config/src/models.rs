// --- File: crates/psiconnect_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Booking Config ---
// Everything the slot generator and the selection cart need.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    /// Price of a single session in whole currency units.
    pub session_price: i64,
    /// Maximum number of slots a patient may hold in the cart at once.
    pub max_selected_slots: usize,
    /// Calendar days covered by one period page.
    pub days_per_period: u32,
    /// Times of day offered on every working day, in display order.
    pub time_slots: Vec<String>,
    /// A slot is pre-booked when `|hash| % 10` is greater than this value.
    pub booked_threshold: u32,
    /// Drop holidays from the generated window instead of only flagging them.
    pub exclude_holidays: bool,
    /// Additional holidays in YYYY-MM-DD format.
    pub extra_holidays: Vec<String>,
    /// IANA time zone used to decide what "today" is.
    pub time_zone: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            session_price: 150,
            max_selected_slots: 4,
            days_per_period: 5,
            time_slots: ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            booked_threshold: 6,
            exclude_holidays: false,
            extra_holidays: Vec::new(),
            time_zone: "America/Sao_Paulo".to_string(),
        }
    }
}

// --- Simulation Config ---
// Latencies of the fake backend.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub login_delay_ms: u64,
    pub payment_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: 1000,
            payment_delay_ms: 3000,
        }
    }
}

// --- Checkout Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CheckoutConfig {
    pub currency_symbol: String,
    /// PIX copy-and-paste payload. May be set to "secret_from_env" to read CHECKOUT_PIX_CODE.
    pub pix_code: String,
    /// Directory receipts are written to.
    pub receipt_dir: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            pix_code: "00020126580014BR.GOV.BCB.PIX0136123e4567-e12b-12d1-a456-42665544000052040000530398654041.505802BR5913PSICOLOGIA APP6009SAO PAULO62070503***6304C2A3".to_string(),
            receipt_dir: "receipts".to_string(),
        }
    }
}

// --- Clinic Config ---
// Who the patient books with.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClinicConfig {
    pub psychologist: String,
    pub specialty: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            psychologist: "Dra. Maria Silva".to_string(),
            specialty: "Psicologia Clínica".to_string(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub clinic: ClinicConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
