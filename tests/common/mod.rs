use bip270::application::engine::{CreateInvoice, EngineConfig, InvoiceEngine, OutputRequest};
use bip270::domain::payment::Payment;
use bip270::infrastructure::in_memory::{InMemoryInvoiceStore, SequentialScriptSource};
use bitcoin::absolute::LockTime;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

pub fn engine() -> InvoiceEngine {
    InvoiceEngine::new(
        Box::new(InMemoryInvoiceStore::new()),
        Box::new(SequentialScriptSource::new()),
        EngineConfig::default(),
    )
}

pub fn invoice_request(amounts: &[u64]) -> CreateInvoice {
    CreateInvoice {
        description: Some("integration invoice".to_string()),
        expiration: 60,
        outputs: amounts
            .iter()
            .map(|&amount| OutputRequest {
                description: None,
                amount,
            })
            .collect(),
    }
}

/// Builds the hex of a one-input transaction paying the given script/amount
/// pairs.
pub fn transaction_paying(entries: &[(String, u64)]) -> String {
    let output = entries
        .iter()
        .map(|(script, amount)| TxOut {
            value: Amount::from_sat(*amount),
            script_pubkey: ScriptBuf::from_bytes(hex::decode(script).unwrap()),
        })
        .collect();
    let tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output,
    };
    hex::encode(bitcoin::consensus::serialize(&tx))
}

pub fn payment_with(transaction: String) -> Payment {
    Payment {
        transaction,
        merchant_data: None,
        refund_to: None,
        memo: Some("take my money".to_string()),
    }
}
