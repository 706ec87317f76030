#![allow(dead_code)]

use async_trait::async_trait;
use checkout_flow::application::TransactionFlow;
use checkout_flow::domain::payment::{CardDetails, TransactionPayload};
use checkout_flow::domain::ports::{Collaborators, OrderClient};
use checkout_flow::domain::step::{Step, StepEvent};
use checkout_flow::error::BackendError;
use checkout_flow::infrastructure::card_validator::BasicCardValidator;
use checkout_flow::infrastructure::simulated::{SimulatedOrderClient, SimulatedTokenizer};
use futures::StreamExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, oneshot};

pub fn valid_card() -> CardDetails {
    CardDetails {
        name: "Ada Lovelace".to_string(),
        number: "4242424242424242".to_string(),
        cvc: "123".to_string(),
        zip: "94110".to_string(),
        expiration_date: "07/29".to_string(),
    }
}

pub fn cart() -> Value {
    json!({ "products": [{ "product_slug": "value_bundle", "cost": 99 }] })
}

pub fn collaborators(
    tokenizer: &SimulatedTokenizer,
    orders: Arc<dyn OrderClient>,
) -> Collaborators {
    Collaborators::new(
        Arc::new(BasicCardValidator::new()),
        Arc::new(tokenizer.clone()),
        orders,
    )
}

/// Drains a flow, failing the test on a start-time fault.
pub async fn collect_steps(flow: TransactionFlow) -> Vec<StepEvent> {
    flow.map(|step| step.expect("flow failed to start"))
        .collect()
        .await
}

pub fn names(steps: &[StepEvent]) -> Vec<Step> {
    steps.iter().map(|step| step.name).collect()
}

/// Checks the first/last discipline every flow must keep.
pub fn assert_well_formed(steps: &[StepEvent]) {
    assert!(!steps.is_empty(), "flow produced no steps");
    assert_eq!(steps[0].name, Step::InputValidation);
    assert!(steps[0].first);
    assert!(steps.iter().skip(1).all(|step| !step.first));

    let last = steps.last().unwrap();
    assert!(last.last);
    assert_eq!(steps.iter().filter(|step| step.last).count(), 1);

    assert!(
        steps
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    );
}

/// An order backend that holds every submission until released.
pub struct GatedOrderClient {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    calls: AtomicUsize,
}

impl GatedOrderClient {
    pub fn new() -> (Self, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        let client = Self {
            gate: Mutex::new(Some(gate)),
            calls: AtomicUsize::new(0),
        };
        (client, release)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderClient for GatedOrderClient {
    async fn submit(&self, _payload: TransactionPayload) -> Result<Value, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(json!({ "receipt_id": 1 }))
    }
}

pub fn accepting_backend() -> (Arc<SimulatedOrderClient>, Arc<dyn OrderClient>) {
    let client = Arc::new(SimulatedOrderClient::accepting());
    let port: Arc<dyn OrderClient> = client.clone();
    (client, port)
}
