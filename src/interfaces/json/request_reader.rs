use crate::domain::payment::TransactionRequest;
use crate::error::Result;
use std::io::Read;

/// Reads a single transaction request from a JSON source.
pub struct RequestReader<R: Read> {
    source: R,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn request(self) -> Result<TransactionRequest> {
        Ok(serde_json::from_reader(self.source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentVariant;
    use crate::error::PaymentError;

    #[test]
    fn test_reader_stored_card_request() {
        let data = r#"{
            "cart": { "products": [{ "product_slug": "premium" }] },
            "payment": { "payment_method": "WPCOM_Billing_MoneyPress_Stored", "reference": "mp-42" }
        }"#;
        let request = RequestReader::new(data.as_bytes()).request().unwrap();

        assert_eq!(
            request.payment,
            PaymentVariant::StoredCard {
                reference: "mp-42".to_string()
            }
        );
        assert_eq!(request.domain_details, None);
    }

    #[test]
    fn test_reader_malformed_json() {
        let result = RequestReader::new("{ \"cart\": ".as_bytes()).request();
        assert!(matches!(result, Err(PaymentError::Json(_))));
    }

    #[test]
    fn test_reader_missing_payment() {
        let result = RequestReader::new(r#"{ "cart": {} }"#.as_bytes()).request();
        assert!(result.is_err());
    }
}
