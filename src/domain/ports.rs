use super::payment::{CardDetails, TransactionPayload};
use super::step::FieldError;
use crate::error::{BackendError, TokenizationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of checking card fields. An empty error list means the card passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardValidation {
    pub errors: Vec<FieldError>,
}

impl CardValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Gateway field names for a token-creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenParameters {
    pub name: String,
    pub number: String,
    pub cvc: String,
    pub zip: String,
    pub exp_month: String,
    pub exp_year: String,
}

/// What the gateway hands back when the request itself went through.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

pub trait CardValidator: Send + Sync {
    fn validate(&self, details: &CardDetails) -> CardValidation;
}

#[async_trait]
pub trait TokenGateway: Send + Sync {
    /// `Err` means the request failed outright; an application-level failure
    /// comes back as `Ok` with `is_error` set.
    async fn create_token(
        &self,
        parameters: TokenParameters,
    ) -> Result<TokenResponse, TokenizationError>;
}

/// Resolves the tokenization client, which may not be available.
#[async_trait]
pub trait TokenizerLoader: Send + Sync {
    async fn ready(&self) -> Result<Arc<dyn TokenGateway>, TokenizationError>;
}

#[async_trait]
pub trait OrderClient: Send + Sync {
    async fn submit(&self, payload: TransactionPayload) -> Result<Value, BackendError>;
}

pub type CardValidatorRef = Arc<dyn CardValidator>;
pub type TokenizerLoaderRef = Arc<dyn TokenizerLoader>;
pub type OrderClientRef = Arc<dyn OrderClient>;

/// The external collaborators one flow talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub validator: CardValidatorRef,
    pub tokenizer: TokenizerLoaderRef,
    pub orders: OrderClientRef,
}

impl Collaborators {
    pub fn new(
        validator: CardValidatorRef,
        tokenizer: TokenizerLoaderRef,
        orders: OrderClientRef,
    ) -> Self {
        Self {
            validator,
            tokenizer,
            orders,
        }
    }
}
