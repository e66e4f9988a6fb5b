//! # Rostercall Provider
//! HTTP client for the scheduling source: plan listing, role assignments,
//! and needed-position records, with bounded retry and full pagination.

pub mod client;
pub mod records;

pub use client::ProviderClient;
