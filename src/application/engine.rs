use crate::domain::invoice::{Invoice, InvoiceListing, InvoiceOutput, InvoiceSummary, RequestState};
use crate::domain::payment::{Payment, PaymentAck};
use crate::domain::ports::{InvoiceStoreBox, ScriptSourceBox};
use crate::domain::request::{Output, PaymentRequest};
use crate::error::{InvoiceError, Result};
use bitcoin::Transaction;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// A requested payment destination; the engine assigns the script.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OutputRequest {
    #[serde(default)]
    pub description: Option<String>,
    pub amount: u64,
}

/// An invoice creation command.
///
/// `expiration` is in minutes; zero means the invoice never expires.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CreateInvoice {
    #[serde(default)]
    pub description: Option<String>,
    pub expiration: i64,
    pub outputs: Vec<OutputRequest>,
}

/// Notifications broadcast to interested listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceEvent {
    Paid { uid: Uuid },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL advertised in `paymentUrl` fields.
    pub payment_url_base: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            payment_url_base: "http://127.0.0.1:58200".to_string(),
        }
    }
}

/// Column an invoice listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortColumn {
    CreationTimestamp,
    ExpirationTimestamp,
    Description,
    State,
    Amount,
}

#[derive(Debug, Clone)]
pub struct InvoiceQuery {
    /// Keep only invoices in one of these states; empty keeps everything.
    pub states: Vec<RequestState>,
    pub sort_by: SortColumn,
    pub descending: bool,
    pub offset: usize,
    pub limit: usize,
}

impl Default for InvoiceQuery {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            sort_by: SortColumn::CreationTimestamp,
            descending: true,
            offset: 0,
            limit: usize::MAX,
        }
    }
}

/// The main entry point for issuing and settling invoices.
///
/// Owns the invoice store and the script source, and broadcasts an
/// [`InvoiceEvent`] whenever an invoice is paid.
pub struct InvoiceEngine {
    store: InvoiceStoreBox,
    scripts: ScriptSourceBox,
    config: EngineConfig,
    events: broadcast::Sender<InvoiceEvent>,
}

impl InvoiceEngine {
    pub fn new(store: InvoiceStoreBox, scripts: ScriptSourceBox, config: EngineConfig) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            store,
            scripts,
            config,
            events,
        }
    }

    /// Subscribes to invoice notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<InvoiceEvent> {
        self.events.subscribe()
    }

    /// Creates a new unpaid invoice and returns its uid.
    ///
    /// A blank description is treated as absent. Each requested output is
    /// assigned a fresh script from the script source.
    pub async fn create_invoice(&self, request: CreateInvoice) -> Result<Uuid> {
        let description = request
            .description
            .filter(|description| !description.trim().is_empty());

        let mut outputs = Vec::with_capacity(request.outputs.len());
        for output in request.outputs {
            if let Some(description) = &output.description
                && description.len() >= 100
            {
                return Err(InvoiceError::Validation(
                    "output description too long".to_string(),
                ));
            }
            outputs.push(InvoiceOutput {
                script: self.scripts.next_script(),
                amount: output.amount,
                description: output.description,
            });
        }

        let uid = Uuid::new_v4();
        let date_created = Utc::now();
        let date_expires = if request.expiration == 0 {
            None
        } else {
            let window = Duration::try_minutes(request.expiration).ok_or_else(|| {
                InvoiceError::Validation("invoice expiration out of range".to_string())
            })?;
            let expires = date_created.checked_add_signed(window).ok_or_else(|| {
                InvoiceError::Validation("invoice expiration out of range".to_string())
            })?;
            Some(expires)
        };

        let invoice = Invoice::new(uid, description, date_created, date_expires, outputs);
        self.store.store(invoice).await?;
        debug!(%uid, "created invoice");
        Ok(uid)
    }

    pub async fn invoice(&self, uid: Uuid) -> Result<Invoice> {
        self.store
            .get(uid)
            .await?
            .ok_or(InvoiceError::UnknownInvoice(uid))
    }

    /// The URL a payer fetches the payment request from and submits to.
    pub fn payment_url(&self, uid: Uuid) -> String {
        format!("{}/api/bip270/{}", self.config.payment_url_base, uid)
    }

    /// The `bitcoin:` URI handed to wallets for this invoice.
    pub fn payment_uri(&self, uid: Uuid) -> String {
        format!("bitcoin:?r={}&sv", self.payment_url(uid))
    }

    /// Renders the BIP270 payment request message for an invoice.
    pub async fn payment_request(&self, uid: Uuid) -> Result<PaymentRequest> {
        let invoice = self.invoice(uid).await?;
        let outputs = invoice
            .outputs
            .iter()
            .map(|output| {
                Output::new(
                    output.script.clone(),
                    output.amount,
                    output.description.clone().unwrap_or_default(),
                )
            })
            .collect();
        Ok(PaymentRequest::new(
            invoice.date_created.timestamp(),
            invoice.date_expires.map(|date| date.timestamp()),
            outputs,
            invoice.description.clone().unwrap_or_default(),
            Some(self.payment_url(uid)),
            None,
        ))
    }

    /// Settles a submitted payment against the invoice.
    ///
    /// Every requested output must appear in the paying transaction with the
    /// exact amount. Resubmitting the transaction that already settled the
    /// invoice is accepted; a different transaction is rejected.
    pub async fn submit_payment(&self, uid: Uuid, payment: Payment) -> Result<PaymentAck> {
        let mut invoice = self.invoice(uid).await?;

        let raw = hex::decode(&payment.transaction)?;
        let tx: Transaction = bitcoin::consensus::deserialize(&raw)?;
        let txid = tx.compute_txid().to_string();

        match &invoice.tx_hash {
            None => {
                debug!(%uid, %txid, "attempting to settle payment request");

                let tx_outputs: HashMap<Vec<u8>, u64> = tx
                    .output
                    .iter()
                    .map(|output| (output.script_pubkey.as_bytes().to_vec(), output.value.to_sat()))
                    .collect();
                for output in &invoice.outputs {
                    let script = hex::decode(&output.script)?;
                    match tx_outputs.get(&script) {
                        None => return Err(InvoiceError::MissingOutput),
                        Some(&value) if value != output.amount => {
                            return Err(InvoiceError::InvalidOutputAmount);
                        }
                        Some(_) => {}
                    }
                }

                invoice.tx_hash = Some(txid.clone());
                invoice.state = RequestState::Paid;
                self.store.store(invoice).await?;
                debug!(%uid, %txid, "payment request paid");

                // No receivers is fine; notifications are best effort.
                let _ = self.events.send(InvoiceEvent::Paid { uid });
            }
            Some(existing) if *existing != txid => return Err(InvoiceError::AlreadyPaid),
            Some(_) => {}
        }

        Ok(PaymentAck { payment })
    }

    /// Closes an invoice so it is no longer expected to be paid.
    pub async fn cancel_invoice(&self, uid: Uuid) -> Result<()> {
        let mut invoice = self.invoice(uid).await?;
        invoice.state = RequestState::Closed;
        self.store.store(invoice).await
    }

    /// Lists invoice summaries filtered, sorted and paginated per the query.
    pub async fn list_invoices(&self, query: &InvoiceQuery) -> Result<InvoiceListing> {
        let invoices = self.store.all().await?;
        let mut rows: Vec<InvoiceSummary> = invoices
            .iter()
            .filter(|invoice| query.states.is_empty() || query.states.contains(&invoice.state))
            .map(InvoiceSummary::from)
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match query.sort_by {
                SortColumn::CreationTimestamp => a.creation_timestamp.cmp(&b.creation_timestamp),
                SortColumn::ExpirationTimestamp => {
                    a.expiration_timestamp.cmp(&b.expiration_timestamp)
                }
                SortColumn::Description => a.description.cmp(&b.description),
                SortColumn::State => a.state.cmp(&b.state),
                SortColumn::Amount => a.amount.cmp(&b.amount),
            };
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let total = rows.len();
        let rows = rows
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();
        Ok(InvoiceListing {
            total,
            total_not_filtered: total,
            rows,
        })
    }
}
