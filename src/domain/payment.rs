use serde::{Deserialize, Serialize};

/// A payment submitted against an invoice.
///
/// `transaction` is the hex-encoded raw transaction that pays the requested
/// outputs. The remaining fields are copied through untouched.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub transaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Acknowledgement of an accepted payment; echoes the payment back.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentAck {
    pub payment: Payment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_deserializes_with_transaction_only() {
        let payment: Payment = serde_json::from_str(r#"{"transaction":"0100"}"#).unwrap();
        assert_eq!(payment.transaction, "0100");
        assert!(payment.merchant_data.is_none());
        assert!(payment.refund_to.is_none());
        assert!(payment.memo.is_none());
    }

    #[test]
    fn test_ack_echoes_payment() {
        let payment = Payment {
            transaction: "0100".to_string(),
            merchant_data: Some("order-123".to_string()),
            refund_to: None,
            memo: Some("thanks".to_string()),
        };
        let ack = PaymentAck {
            payment: payment.clone(),
        };
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["payment"]["transaction"], "0100");
        assert_eq!(value["payment"]["merchantData"], "order-123");
        assert_eq!(value["payment"]["memo"], "thanks");
        assert_eq!(ack.payment, payment);
    }
}
