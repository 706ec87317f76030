use crate::error::{BackendError, TokenizationError};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Stable identifiers for the milestones of a transaction flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    InputValidation,
    SubmittingPaymentKeyRequest,
    ReceivedPaymentKeyResponse,
    SubmittingBackendRequest,
    ReceivedBackendResponse,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::InputValidation => "input-validation",
            Step::SubmittingPaymentKeyRequest => "submitting-payment-key-request",
            Step::ReceivedPaymentKeyResponse => "received-payment-key-response",
            Step::SubmittingBackendRequest => "submitting-backend-request",
            Step::ReceivedBackendResponse => "received-backend-response",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Client-side validation failure of the card fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub code: String,
    pub errors: Vec<FieldError>,
}

/// Failure of one of the external collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdapterFailure {
    pub cause: String,
}

/// Error carried as data inside a [`StepEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepError {
    Validation(ValidationError),
    Adapter(AdapterFailure),
}

impl StepError {
    pub fn validation(code: &str, errors: Vec<FieldError>) -> Self {
        StepError::Validation(ValidationError {
            code: code.to_string(),
            errors,
        })
    }
}

impl From<TokenizationError> for StepError {
    fn from(error: TokenizationError) -> Self {
        StepError::Adapter(AdapterFailure {
            cause: error.to_string(),
        })
    }
}

impl From<BackendError> for StepError {
    fn from(error: BackendError) -> Self {
        StepError::Adapter(AdapterFailure {
            cause: error.to_string(),
        })
    }
}

/// One element of the sequence produced by a transaction flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepEvent {
    pub name: Step,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub first: bool,
    pub last: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StepError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl StepEvent {
    /// An intermediate event stamped with the current time.
    pub fn new(name: Step) -> Self {
        Self {
            name,
            timestamp: Utc::now().timestamp_millis(),
            first: false,
            last: false,
            error: None,
            data: None,
        }
    }

    pub fn first(mut self) -> Self {
        self.first = true;
        self
    }

    pub fn last(mut self) -> Self {
        self.last = true;
        self
    }

    pub fn with_error(mut self, error: impl Into<StepError>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
