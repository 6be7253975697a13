// --- File: crates/psiconnect_checkout/src/error.rs ---
use psiconnect_common::PsiError;
use thiserror::Error;

/// Checkout-specific error types.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Nothing to pay for
    #[error("Nenhuma sessão selecionada")]
    EmptySelection,

    /// Card form not complete; carries the first missing field
    #[error("Dados do cartão incompletos: {0}")]
    IncompleteCard(String),

    /// Unknown payment method name
    #[error("Forma de pagamento desconhecida: {0}")]
    UnknownMethod(String),

    /// Receipt requested before a payment completed
    #[error("Nenhum pagamento para gerar comprovante")]
    NoPayment,

    /// Writing the receipt file failed
    #[error("Failed to write receipt: {0}")]
    ReceiptIo(#[from] std::io::Error),
}

/// Convert CheckoutError to PsiError
impl From<CheckoutError> for PsiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptySelection
            | CheckoutError::IncompleteCard(_)
            | CheckoutError::UnknownMethod(_)
            | CheckoutError::NoPayment => PsiError::ValidationError(err.to_string()),
            CheckoutError::ReceiptIo(e) => {
                PsiError::InternalError(format!("receipt write failed: {}", e))
            }
        }
    }
}
