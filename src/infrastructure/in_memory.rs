use crate::domain::invoice::Invoice;
use crate::domain::ports::{InvoiceStore, ScriptSource};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for invoices.
///
/// Uses `Arc<RwLock<HashMap<Uuid, Invoice>>>` to allow shared concurrent
/// access. Suitable for testing and single-process deployments where
/// persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Creates a new, empty in-memory invoice store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn store(&self, invoice: Invoice) -> Result<()> {
        let mut invoices = self.invoices.write().await;
        invoices.insert(invoice.uid, invoice);
        Ok(())
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.get(&uid).cloned())
    }

    async fn all(&self) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.values().cloned().collect())
    }
}

/// Produces unique P2PKH-shaped scripts from an atomic counter.
///
/// Stands in for a wallet-backed script source; the scripts carry no usable
/// key material.
#[derive(Default)]
pub struct SequentialScriptSource {
    index: AtomicU32,
}

impl SequentialScriptSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptSource for SequentialScriptSource {
    fn next_script(&self) -> String {
        let index = self.index.fetch_add(1, Ordering::SeqCst);
        format!("76a914{index:040x}88ac")
    }
}
