use super::invoice::Invoice;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Inserts or replaces the invoice keyed by its uid.
    async fn store(&self, invoice: Invoice) -> Result<()>;
    async fn get(&self, uid: Uuid) -> Result<Option<Invoice>>;
    async fn all(&self) -> Result<Vec<Invoice>>;
}

/// Yields a fresh locking script for each requested output.
///
/// Wallet-backed implementations derive these from key material; the seam
/// keeps key handling out of the engine.
pub trait ScriptSource: Send + Sync {
    fn next_script(&self) -> String;
}

pub type InvoiceStoreBox = Box<dyn InvoiceStore>;
pub type ScriptSourceBox = Box<dyn ScriptSource>;
