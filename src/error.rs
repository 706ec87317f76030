use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Failure reported by the tokenization loader or gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizationError {
    /// The gateway client could not be loaded at all.
    #[error("Paygate Loader Error: {0}")]
    LoaderUnavailable(String),
    /// The gateway answered, but flagged the response as an error.
    #[error("Paygate Response Error: {0}")]
    Response(String),
    #[error("Paygate Request Error")]
    Request,
}

/// Opaque failure reported by the order-submission backend.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct BackendError(pub String);
