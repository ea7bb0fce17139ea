//! Application layer containing the invoice business logic.
//!
//! This module defines the `InvoiceEngine`, the primary entry point for
//! creating invoices, rendering BIP270 payment requests and settling
//! submitted payments against them.

pub mod engine;
