use super::flow::{FlowContext, StepSink};
use super::submission::submit_with_payment;
use super::tokenization::request_payment_key;
use crate::domain::payment::{CardDetails, PaymentDescriptor, PaymentMethod, PaymentVariant};
use crate::domain::step::{Step, StepError, StepEvent};
use crate::error::{PaymentError, Result};
use tracing::{debug, info};

pub const INVALID_CARD_DETAILS: &str = "invalid-card-details";

/// The routine chosen for a flow, one per supported payment method.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Handler {
    StoredCard { reference: String },
    NewCard { details: CardDetails },
    FullCredits,
}

impl Handler {
    pub fn resolve(payment: &PaymentVariant) -> Result<Self> {
        match payment {
            PaymentVariant::StoredCard { reference } => Ok(Handler::StoredCard {
                reference: reference.clone(),
            }),
            PaymentVariant::NewCard { details } => Ok(Handler::NewCard {
                details: details.clone(),
            }),
            PaymentVariant::FullCredits => Ok(Handler::FullCredits),
            PaymentVariant::Unrecognized { payment_method } => {
                Err(PaymentError::InvalidPaymentMethod(payment_method.clone()))
            }
        }
    }

    pub async fn run(self, context: FlowContext, sink: StepSink) {
        match self {
            Handler::StoredCard { reference } => {
                pay_with_stored_card(&context, &sink, reference).await
            }
            Handler::NewCard { details } => pay_with_new_card(&context, &sink, &details).await,
            Handler::FullCredits => pay_with_credits(&context, &sink).await,
        }
    }
}

/// Stored instruments were validated when they were saved.
async fn pay_with_stored_card(context: &FlowContext, sink: &StepSink, reference: String) {
    sink.push(StepEvent::new(Step::InputValidation).first());
    debug!("submitting transaction with stored card");
    let payment = PaymentDescriptor::new(PaymentMethod::StoredCard, Some(reference));
    submit_with_payment(context, sink, payment).await;
}

async fn pay_with_new_card(context: &FlowContext, sink: &StepSink, details: &CardDetails) {
    let validation = context.collaborators.validator.validate(details);
    if !validation.is_valid() {
        info!(errors = validation.errors.len(), "card details failed validation");
        sink.push(
            StepEvent::new(Step::InputValidation)
                .first()
                .last()
                .with_error(StepError::validation(
                    INVALID_CARD_DETAILS,
                    validation.errors,
                )),
        );
        return;
    }

    sink.push(StepEvent::new(Step::InputValidation).first());
    debug!("submitting transaction with new card");
    let Some(token) =
        request_payment_key(context.collaborators.tokenizer.as_ref(), details, sink).await
    else {
        return;
    };

    let payment = PaymentDescriptor::new(PaymentMethod::NewCard, Some(token));
    submit_with_payment(context, sink, payment).await;
}

/// Account credits need neither card data nor a payment key.
async fn pay_with_credits(context: &FlowContext, sink: &StepSink) {
    sink.push(StepEvent::new(Step::InputValidation).first());
    debug!("submitting transaction with account credits");
    let payment = PaymentDescriptor::new(PaymentMethod::FullCredits, None);
    submit_with_payment(context, sink, payment).await;
}
