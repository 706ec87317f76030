use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw card fields as entered by the buyer, before tokenization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub name: String,
    pub number: String,
    #[serde(alias = "cvv")]
    pub cvc: String,
    #[serde(alias = "postal-code")]
    pub zip: String,
    #[serde(rename = "expiration-date")]
    pub expiration_date: String,
}

/// A previously saved payment instrument, as the caller holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCard {
    pub mp_ref: String,
}

/// The billing methods the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    StoredCard,
    NewCard,
    FullCredits,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::StoredCard, Self::NewCard, Self::FullCredits];

    /// The tag sent to the backend as `payment_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::StoredCard => "WPCOM_Billing_MoneyPress_Stored",
            PaymentMethod::NewCard => "WPCOM_Billing_MoneyPress_Paygate",
            PaymentMethod::FullCredits => "WPCOM_Billing_WPCOM",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == tag)
    }
}

/// How the buyer intends to pay.
///
/// Built through [`stored_card_payment`], [`new_card_payment`] or
/// [`full_credits_payment`]. `Unrecognized` only ever comes out of
/// deserialization and is rejected when a flow starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaymentRecord", into = "PaymentRecord")]
pub enum PaymentVariant {
    StoredCard { reference: String },
    NewCard { details: CardDetails },
    FullCredits,
    Unrecognized { payment_method: String },
}

impl PaymentVariant {
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        match self {
            PaymentVariant::StoredCard { .. } => Some(PaymentMethod::StoredCard),
            PaymentVariant::NewCard { .. } => Some(PaymentMethod::NewCard),
            PaymentVariant::FullCredits => Some(PaymentMethod::FullCredits),
            PaymentVariant::Unrecognized { .. } => None,
        }
    }

    /// The tag as it appears on the wire, recognized or not.
    pub fn tag(&self) -> &str {
        match self {
            PaymentVariant::Unrecognized { payment_method } => payment_method,
            other => other
                .payment_method()
                .map(|method| method.as_str())
                .unwrap_or_default(),
        }
    }
}

/// Flat wire shape of a payment description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<CardDetails>,
}

impl From<PaymentRecord> for PaymentVariant {
    fn from(record: PaymentRecord) -> Self {
        match PaymentMethod::from_tag(&record.payment_method) {
            Some(PaymentMethod::StoredCard) => PaymentVariant::StoredCard {
                reference: record.reference.unwrap_or_default(),
            },
            Some(PaymentMethod::NewCard) => PaymentVariant::NewCard {
                details: record.details.unwrap_or_default(),
            },
            Some(PaymentMethod::FullCredits) => PaymentVariant::FullCredits,
            None => PaymentVariant::Unrecognized {
                payment_method: record.payment_method,
            },
        }
    }
}

impl From<PaymentVariant> for PaymentRecord {
    fn from(variant: PaymentVariant) -> Self {
        let payment_method = variant.tag().to_string();
        match variant {
            PaymentVariant::StoredCard { reference } => PaymentRecord {
                payment_method,
                reference: Some(reference),
                details: None,
            },
            PaymentVariant::NewCard { details } => PaymentRecord {
                payment_method,
                reference: None,
                details: Some(details),
            },
            PaymentVariant::FullCredits | PaymentVariant::Unrecognized { .. } => PaymentRecord {
                payment_method,
                reference: None,
                details: None,
            },
        }
    }
}

pub fn stored_card_payment(card: &StoredCard) -> PaymentVariant {
    PaymentVariant::StoredCard {
        reference: card.mp_ref.clone(),
    }
}

/// Missing details are treated as an empty card, which fails validation.
pub fn new_card_payment(details: Option<CardDetails>) -> PaymentVariant {
    PaymentVariant::NewCard {
        details: details.unwrap_or_default(),
    }
}

pub fn full_credits_payment() -> PaymentVariant {
    PaymentVariant::FullCredits
}

/// Input to one transaction flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// The shopping cart, passed through to the backend untouched.
    pub cart: Value,
    pub payment: PaymentVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_details: Option<Value>,
}

impl TransactionRequest {
    pub fn new(cart: Value, payment: PaymentVariant) -> Self {
        Self {
            cart,
            payment,
            domain_details: None,
        }
    }

    pub fn with_domain_details(mut self, domain_details: Value) -> Self {
        self.domain_details = Some(domain_details);
        self
    }
}

/// Resolved payment for the backend: the method tag plus the key that
/// authorizes it, when the method needs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentDescriptor {
    pub payment_method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_key: Option<String>,
}

impl PaymentDescriptor {
    pub fn new(method: PaymentMethod, payment_key: Option<String>) -> Self {
        Self {
            payment_method: method.as_str(),
            payment_key,
        }
    }
}

/// Body of the order submission sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPayload {
    pub cart: Value,
    pub domain_details: Option<Value>,
    pub payment: PaymentDescriptor,
}

impl TransactionPayload {
    pub fn new(request: &TransactionRequest, payment: PaymentDescriptor) -> Self {
        Self {
            cart: request.cart.clone(),
            domain_details: request.domain_details.clone(),
            payment,
        }
    }
}

/// True when the request carries non-empty domain registration details.
pub fn has_domain_details(request: &TransactionRequest) -> bool {
    match &request.domain_details {
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::String(text)) => !text.is_empty(),
        _ => false,
    }
}
