use crate::domain::payment::TransactionPayload;
use crate::domain::ports::{
    OrderClient, TokenGateway, TokenParameters, TokenResponse, TokenizerLoader,
};
use crate::error::{BackendError, TokenizationError};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// How the simulated gateway answers token requests.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    /// Issues `tok_<n>` tokens.
    Approve,
    /// Answers, but flags the response as an error with this message.
    Decline(String),
    /// The request itself fails.
    Reject,
    /// The gateway client never loads.
    Unavailable,
}

/// An in-process tokenization loader and gateway.
///
/// Clones share their counters, so a test can keep one handle while the
/// flow owns another.
#[derive(Debug, Clone)]
pub struct SimulatedTokenizer {
    outcome: GatewayOutcome,
    loads: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
}

impl SimulatedTokenizer {
    pub fn new(outcome: GatewayOutcome) -> Self {
        Self {
            outcome,
            loads: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn approving() -> Self {
        Self::new(GatewayOutcome::Approve)
    }

    /// Number of times the loader was asked for the gateway.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of token-creation requests received.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenizerLoader for SimulatedTokenizer {
    async fn ready(&self) -> Result<Arc<dyn TokenGateway>, TokenizationError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            GatewayOutcome::Unavailable => Err(TokenizationError::LoaderUnavailable(
                "gateway client failed to load".to_string(),
            )),
            _ => Ok(Arc::new(self.clone())),
        }
    }
}

#[async_trait]
impl TokenGateway for SimulatedTokenizer {
    async fn create_token(
        &self,
        _parameters: TokenParameters,
    ) -> Result<TokenResponse, TokenizationError> {
        let issued = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.outcome {
            GatewayOutcome::Approve => Ok(TokenResponse {
                token: Some(format!("tok_{issued}")),
                ..TokenResponse::default()
            }),
            GatewayOutcome::Decline(message) => Ok(TokenResponse {
                is_error: true,
                error_msg: Some(message.clone()),
                token: None,
            }),
            GatewayOutcome::Reject | GatewayOutcome::Unavailable => {
                Err(TokenizationError::Request)
            }
        }
    }
}

/// How the simulated backend answers order submissions.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendOutcome {
    Accept,
    Fail(String),
}

/// An in-process order backend that records every payload it receives.
#[derive(Debug, Clone)]
pub struct SimulatedOrderClient {
    outcome: BackendOutcome,
    received: Arc<RwLock<Vec<TransactionPayload>>>,
}

impl SimulatedOrderClient {
    pub fn new(outcome: BackendOutcome) -> Self {
        Self {
            outcome,
            received: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn accepting() -> Self {
        Self::new(BackendOutcome::Accept)
    }

    pub async fn payloads(&self) -> Vec<TransactionPayload> {
        self.received.read().await.clone()
    }
}

#[async_trait]
impl OrderClient for SimulatedOrderClient {
    async fn submit(&self, payload: TransactionPayload) -> Result<Value, BackendError> {
        let mut received = self.received.write().await;
        let payment_method = payload.payment.payment_method;
        let cart = payload.cart.clone();
        received.push(payload);

        match &self.outcome {
            BackendOutcome::Accept => Ok(json!({
                "receipt_id": received.len(),
                "payment_method": payment_method,
                "purchases": cart,
            })),
            BackendOutcome::Fail(message) => Err(BackendError(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{
        PaymentDescriptor, PaymentMethod, TransactionRequest, full_credits_payment,
    };

    fn parameters() -> TokenParameters {
        TokenParameters {
            name: "Ada".to_string(),
            number: "4242424242424242".to_string(),
            cvc: "123".to_string(),
            zip: "94110".to_string(),
            exp_month: "07".to_string(),
            exp_year: "2029".to_string(),
        }
    }

    #[tokio::test]
    async fn test_tokenizer_issues_sequential_tokens() {
        let tokenizer = SimulatedTokenizer::approving();
        let gateway = tokenizer.ready().await.unwrap();

        let first = gateway.create_token(parameters()).await.unwrap();
        let second = gateway.create_token(parameters()).await.unwrap();
        assert_eq!(first.token.as_deref(), Some("tok_1"));
        assert_eq!(second.token.as_deref(), Some("tok_2"));
        assert_eq!(tokenizer.loads(), 1);
        assert_eq!(tokenizer.requests(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_loader() {
        let tokenizer = SimulatedTokenizer::new(GatewayOutcome::Unavailable);
        assert!(matches!(
            tokenizer.ready().await,
            Err(TokenizationError::LoaderUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_order_client_records_payloads() {
        let client = SimulatedOrderClient::accepting();
        let request = TransactionRequest::new(json!({ "products": [1] }), full_credits_payment());
        let payload = TransactionPayload::new(
            &request,
            PaymentDescriptor::new(PaymentMethod::FullCredits, None),
        );

        let receipt = client.submit(payload.clone()).await.unwrap();
        assert_eq!(receipt["receipt_id"], 1);
        assert_eq!(receipt["payment_method"], "WPCOM_Billing_WPCOM");
        assert_eq!(client.payloads().await, vec![payload]);
    }

    #[tokio::test]
    async fn test_order_client_failure() {
        let client = SimulatedOrderClient::new(BackendOutcome::Fail("card_declined".to_string()));
        let request = TransactionRequest::new(json!({}), full_credits_payment());
        let payload = TransactionPayload::new(
            &request,
            PaymentDescriptor::new(PaymentMethod::FullCredits, None),
        );

        let error = client.submit(payload).await.unwrap_err();
        assert_eq!(error, BackendError("card_declined".to_string()));
        assert_eq!(client.payloads().await.len(), 1);
    }
}
