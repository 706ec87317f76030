use super::flow::StepSink;
use crate::domain::payment::CardDetails;
use crate::domain::ports::{TokenParameters, TokenizerLoader};
use crate::domain::step::{Step, StepEvent};
use crate::error::TokenizationError;
use tracing::{debug, warn};

/// Exchanges card fields for a one-time payment key, reporting both ends of
/// the exchange on `sink`.
///
/// Returns `None` once a terminal failure event has been pushed.
pub(crate) async fn request_payment_key(
    loader: &dyn TokenizerLoader,
    details: &CardDetails,
    sink: &StepSink,
) -> Option<String> {
    sink.push(StepEvent::new(Step::SubmittingPaymentKeyRequest));

    match create_paygate_token(loader, details).await {
        Ok(token) => {
            sink.push(StepEvent::new(Step::ReceivedPaymentKeyResponse));
            Some(token)
        }
        Err(error) => {
            warn!(%error, "payment key request failed");
            sink.push(
                StepEvent::new(Step::ReceivedPaymentKeyResponse)
                    .last()
                    .with_error(error),
            );
            None
        }
    }
}

/// Creates a gateway token for `details` outside of a transaction flow.
pub async fn create_paygate_token(
    loader: &dyn TokenizerLoader,
    details: &CardDetails,
) -> Result<String, TokenizationError> {
    let gateway = loader.ready().await?;
    let response = gateway.create_token(paygate_parameters(details)).await?;

    if response.is_error {
        return Err(TokenizationError::Response(
            response.error_msg.unwrap_or_default(),
        ));
    }
    debug!("paygate token issued");
    response
        .token
        .ok_or_else(|| TokenizationError::Response("missing token".to_string()))
}

pub fn paygate_parameters(details: &CardDetails) -> TokenParameters {
    let (exp_month, exp_year) = split_expiration(&details.expiration_date);
    TokenParameters {
        name: details.name.clone(),
        number: details.number.clone(),
        cvc: details.cvc.clone(),
        zip: details.zip.clone(),
        exp_month,
        exp_year,
    }
}

/// Splits an `MM/YY` expiration into a month and a four digit year.
///
/// Fixed positions only: two digit years are always read as `20YY`.
pub fn split_expiration(expiration: &str) -> (String, String) {
    let month: String = expiration.chars().take(2).collect();
    let year: String = expiration.chars().skip(3).take(2).collect();
    (month, format!("20{year}"))
}
