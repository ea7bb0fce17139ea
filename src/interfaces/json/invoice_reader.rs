use crate::application::engine::CreateInvoice;
use crate::error::{InvoiceError, Result};
use std::io::Read;

/// Reads invoice creation requests from a JSON lines source.
///
/// Wraps a `serde_json` stream deserializer and provides an iterator over
/// `Result<CreateInvoice>`, so a malformed request surfaces as an error
/// without aborting the stream up front.
pub struct InvoiceReader<R: Read> {
    source: R,
}

impl<R: Read> InvoiceReader<R> {
    /// Creates a new `InvoiceReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<CreateInvoice>> {
        serde_json::Deserializer::from_reader(self.source)
            .into_iter::<CreateInvoice>()
            .map(|result| result.map_err(InvoiceError::from))
    }
}
