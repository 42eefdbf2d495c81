//! HTTP handlers for the server.

pub mod barcode;
pub mod dashboard;
pub mod overlay;
