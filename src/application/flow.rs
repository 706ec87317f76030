use super::dispatch::Handler;
use crate::domain::payment::TransactionRequest;
use crate::domain::ports::Collaborators;
use crate::domain::step::StepEvent;
use crate::error::Result;
use futures::future::BoxFuture;
use futures::stream::FusedStream;
use futures::{FutureExt, Stream};
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::debug;

/// Everything a handler needs for one flow, owned by its driver future.
pub(crate) struct FlowContext {
    pub request: TransactionRequest,
    pub collaborators: Collaborators,
}

/// Write side of the flow's event queue.
pub(crate) struct StepSink {
    events: mpsc::UnboundedSender<StepEvent>,
}

impl StepSink {
    fn channel() -> (Self, mpsc::UnboundedReceiver<StepEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { events }, receiver)
    }

    pub fn push(&self, event: StepEvent) {
        debug!(
            step = event.name.as_str(),
            first = event.first,
            last = event.last,
            failed = event.is_failure(),
            "pushing step"
        );
        // The reader may have stopped listening; nothing left to report to.
        let _ = self.events.send(event);
    }
}

enum FlowState {
    Idle(FlowContext),
    Running {
        driver: Option<BoxFuture<'static, ()>>,
        events: mpsc::UnboundedReceiver<StepEvent>,
    },
    Finished,
}

/// A lazily started stream of the steps of one checkout transaction.
///
/// Building the flow does nothing. The first poll resolves the payment
/// method and starts the handler; every later poll only drives that same
/// handler forward, so collaborators are called at most once per flow.
///
/// The stream ends right after the event marked `last`. An unrecognized
/// payment method is not a step: the first poll yields
/// [`PaymentError::InvalidPaymentMethod`](crate::error::PaymentError) and
/// the stream ends without calling any collaborator.
pub struct TransactionFlow {
    state: FlowState,
}

/// Entry point: wraps `request` in a flow that starts once it is first polled.
pub fn submit(request: TransactionRequest, collaborators: Collaborators) -> TransactionFlow {
    TransactionFlow::new(request, collaborators)
}

impl TransactionFlow {
    pub fn new(request: TransactionRequest, collaborators: Collaborators) -> Self {
        Self {
            state: FlowState::Idle(FlowContext {
                request,
                collaborators,
            }),
        }
    }

    pub fn has_started(&self) -> bool {
        !matches!(self.state, FlowState::Idle(_))
    }

    fn start(context: FlowContext) -> Result<FlowState> {
        let handler = Handler::resolve(&context.request.payment)?;
        debug!(payment_method = context.request.payment.tag(), "starting transaction flow");

        let (sink, events) = StepSink::channel();
        let driver = handler.run(context, sink).boxed();
        Ok(FlowState::Running {
            driver: Some(driver),
            events,
        })
    }
}

impl Stream for TransactionFlow {
    type Item = Result<StepEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        this.state = match mem::replace(&mut this.state, FlowState::Finished) {
            FlowState::Idle(context) => match Self::start(context) {
                Ok(running) => running,
                Err(error) => return Poll::Ready(Some(Err(error))),
            },
            other => other,
        };

        let FlowState::Running { driver, events } = &mut this.state else {
            return Poll::Ready(None);
        };

        let driver_done = match driver {
            Some(future) => future.poll_unpin(cx).is_ready(),
            None => false,
        };
        if driver_done {
            *driver = None;
        }

        match events.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                if event.last {
                    this.state = FlowState::Finished;
                }
                Poll::Ready(Some(Ok(event)))
            }
            Poll::Ready(None) => {
                this.state = FlowState::Finished;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl FusedStream for TransactionFlow {
    fn is_terminated(&self) -> bool {
        matches!(self.state, FlowState::Finished)
    }
}
