use serde::{Deserialize, Serialize};

/// Network identifier carried by every payment request.
pub const NETWORK: &str = "bitcoin";

/// A single payment destination within a payment request.
///
/// The script is kept as the hex-encoded locking script; no validation is
/// applied at construction time.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Output {
    pub script: String,
    pub amount: u64,
    pub description: String,
}

impl Output {
    pub fn new(script: String, amount: u64, description: String) -> Self {
        Self {
            script,
            amount,
            description,
        }
    }
}

/// The BIP270 payment request message sent to a payer.
///
/// Field names serialize to the camelCase names used on the wire. The
/// `network` field is always [`NETWORK`]; callers cannot override it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub network: String,
    pub creation_timestamp: i64,
    #[serde(default)]
    pub expiration_timestamp: Option<i64>,
    pub outputs: Vec<Output>,
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_data: Option<String>,
}

impl PaymentRequest {
    pub fn new(
        creation_timestamp: i64,
        expiration_timestamp: Option<i64>,
        outputs: Vec<Output>,
        memo: String,
        payment_url: Option<String>,
        merchant_data: Option<String>,
    ) -> Self {
        Self {
            network: NETWORK.to_string(),
            creation_timestamp,
            expiration_timestamp,
            outputs,
            memo,
            payment_url,
            merchant_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_exposes_constructor_values() {
        let output = Output::new(
            "76a914bbef244bcad13cffb68b5cef3017c7423675552288ac".to_string(),
            5000,
            "coffee".to_string(),
        );
        assert_eq!(
            output.script,
            "76a914bbef244bcad13cffb68b5cef3017c7423675552288ac"
        );
        assert_eq!(output.amount, 5000);
        assert_eq!(output.description, "coffee");
    }

    #[test]
    fn test_payment_request_network_is_fixed() {
        let request = PaymentRequest::new(
            1690000000,
            Some(1690003600),
            vec![Output::new("76a91488ac".to_string(), 5000, String::new())],
            "thanks".to_string(),
            Some("https://pay.example/ack".to_string()),
            Some("order-123".to_string()),
        );
        assert_eq!(request.network, NETWORK);
        assert_eq!(request.creation_timestamp, 1690000000);
        assert_eq!(request.expiration_timestamp, Some(1690003600));
        assert_eq!(request.outputs.len(), 1);
        assert_eq!(request.memo, "thanks");
        assert_eq!(
            request.payment_url.as_deref(),
            Some("https://pay.example/ack")
        );
        assert_eq!(request.merchant_data.as_deref(), Some("order-123"));
    }

    #[test]
    fn test_payment_request_accepts_empty_outputs() {
        let request = PaymentRequest::new(0, None, vec![], String::new(), None, None);
        assert!(request.outputs.is_empty());
    }

    #[test]
    fn test_payment_request_wire_field_names() {
        let request = PaymentRequest::new(
            1690000000,
            None,
            vec![Output::new("76a91488ac".to_string(), 1, "x".to_string())],
            "memo".to_string(),
            Some("http://127.0.0.1:58200/api/bip270/abc".to_string()),
            None,
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["network"], "bitcoin");
        assert_eq!(value["creationTimestamp"], 1690000000);
        assert!(value["expirationTimestamp"].is_null());
        assert_eq!(value["paymentUrl"], "http://127.0.0.1:58200/api/bip270/abc");
        // merchantData is omitted entirely when absent
        assert!(value.get("merchantData").is_none());
        assert_eq!(value["outputs"][0]["script"], "76a91488ac");
        assert_eq!(value["outputs"][0]["amount"], 1);
    }

    #[test]
    fn test_payment_request_round_trips_through_json() {
        let request = PaymentRequest::new(
            1690000000,
            Some(1690003600),
            vec![Output::new("76a91488ac".to_string(), 5000, "coffee".to_string())],
            "thanks".to_string(),
            None,
            None,
        );
        let json = serde_json::to_string(&request).unwrap();
        let parsed: PaymentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
