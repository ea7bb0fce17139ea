use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, InvoiceError>;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unknown invoice: {0}")]
    UnknownInvoice(Uuid),
    #[error("invoice has an invalid payment transaction: {0}")]
    InvalidTransaction(#[from] bitcoin::consensus::encode::Error),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invoice has a missing output")]
    MissingOutput,
    #[error("invoice has an invalid output amount")]
    InvalidOutputAmount,
    #[error("invoice already paid with different payment")]
    AlreadyPaid,
}
