use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Lifecycle state of an invoice. Serialized as its integer value.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub enum RequestState {
    #[default]
    Unknown,
    Unpaid,
    Paid,
    Closed,
}

impl RequestState {
    pub fn as_int(self) -> u8 {
        match self {
            RequestState::Unknown => 0,
            RequestState::Unpaid => 1,
            RequestState::Paid => 2,
            RequestState::Closed => 3,
        }
    }
}

impl Serialize for RequestState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_int())
    }
}

impl<'de> Deserialize<'de> for RequestState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(RequestState::Unknown),
            1 => Ok(RequestState::Unpaid),
            2 => Ok(RequestState::Paid),
            3 => Ok(RequestState::Closed),
            other => Err(serde::de::Error::custom(format!(
                "invalid request state: {other}"
            ))),
        }
    }
}

/// A stored payment destination belonging to an invoice.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct InvoiceOutput {
    pub script: String,
    pub amount: u64,
    pub description: Option<String>,
}

/// A merchant-side invoice record backing a payment request.
///
/// Tracks the requested outputs, the expiry window and, once settled, the
/// hash of the paying transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Invoice {
    pub uid: Uuid,
    pub state: RequestState,
    pub description: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_expires: Option<DateTime<Utc>>,
    pub outputs: Vec<InvoiceOutput>,
    pub tx_hash: Option<String>,
}

impl Invoice {
    pub fn new(
        uid: Uuid,
        description: Option<String>,
        date_created: DateTime<Utc>,
        date_expires: Option<DateTime<Utc>>,
        outputs: Vec<InvoiceOutput>,
    ) -> Self {
        Self {
            uid,
            state: RequestState::Unpaid,
            description,
            date_created,
            date_expires,
            outputs,
            tx_hash: None,
        }
    }

    /// Sum of all requested output amounts, in satoshis.
    pub fn total_amount(&self) -> u64 {
        self.outputs.iter().map(|output| output.amount).sum()
    }

    /// An invoice with no expiry date never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.date_expires.is_some_and(|expires| expires <= now)
    }
}

/// A single row of an invoice listing.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: String,
    pub state: RequestState,
    pub creation_timestamp: i64,
    pub expiration_timestamp: Option<i64>,
    pub description: Option<String>,
    pub amount: u64,
    #[serde(rename = "tx_hash")]
    pub tx_hash: Option<String>,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.uid.to_string(),
            state: invoice.state,
            creation_timestamp: invoice.date_created.timestamp(),
            expiration_timestamp: invoice.date_expires.map(|d| d.timestamp()),
            description: invoice.description.clone(),
            amount: invoice.total_amount(),
            tx_hash: invoice.tx_hash.clone(),
        }
    }
}

/// A page of invoice summaries plus the unpaginated row count.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListing {
    pub total: usize,
    pub total_not_filtered: usize,
    pub rows: Vec<InvoiceSummary>,
}
