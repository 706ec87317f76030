use super::flow::{FlowContext, StepSink};
use crate::domain::payment::{PaymentDescriptor, TransactionPayload};
use crate::domain::step::{Step, StepEvent};
use tracing::{info, warn};

/// Sends the order to the backend and pushes the terminal step.
pub(crate) async fn submit_with_payment(
    context: &FlowContext,
    sink: &StepSink,
    payment: PaymentDescriptor,
) {
    let payload = TransactionPayload::new(&context.request, payment);

    sink.push(StepEvent::new(Step::SubmittingBackendRequest));

    match context.collaborators.orders.submit(payload).await {
        Ok(data) => {
            info!("transaction accepted by backend");
            sink.push(
                StepEvent::new(Step::ReceivedBackendResponse)
                    .last()
                    .with_data(data),
            );
        }
        Err(error) => {
            warn!(%error, "backend rejected transaction");
            sink.push(
                StepEvent::new(Step::ReceivedBackendResponse)
                    .last()
                    .with_error(error),
            );
        }
    }
}
