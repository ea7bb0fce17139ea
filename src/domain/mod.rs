//! Domain types for BIP270 payment requests, invoices and payments.

pub mod invoice;
pub mod payment;
pub mod ports;
pub mod request;
