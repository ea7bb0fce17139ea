use bip270::application::engine::{CreateInvoice, EngineConfig, InvoiceEngine};
use bip270::domain::ports::{InvoiceStoreBox, ScriptSourceBox};
use bip270::infrastructure::in_memory::{InMemoryInvoiceStore, SequentialScriptSource};
use bip270::interfaces::json::invoice_reader::InvoiceReader;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file of invoice creation requests, one JSON object per line
    input: PathBuf,

    /// Base URL advertised in the paymentUrl of generated requests
    #[arg(long, default_value = "http://127.0.0.1:58200")]
    payment_url_base: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store: InvoiceStoreBox = Box::new(InMemoryInvoiceStore::new());
    let scripts: ScriptSourceBox = Box::new(SequentialScriptSource::new());
    let engine = InvoiceEngine::new(
        store,
        scripts,
        EngineConfig {
            payment_url_base: cli.payment_url_base,
        },
    );

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = InvoiceReader::new(file);
    for request in reader.requests() {
        match request {
            Ok(request) => match render_payment_request(&engine, request).await {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("error creating invoice: {e}"),
            },
            Err(e) => tracing::warn!("error reading invoice request: {e}"),
        }
    }

    Ok(())
}

async fn render_payment_request(
    engine: &InvoiceEngine,
    request: CreateInvoice,
) -> bip270::error::Result<String> {
    let uid = engine.create_invoice(request).await?;
    let payment_request = engine.payment_request(uid).await?;
    Ok(serde_json::to_string(&payment_request)?)
}
