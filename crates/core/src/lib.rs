//! Core business logic for Fintrack.
//!
//! This crate is intentionally free of web and database dependencies.
//! It holds the monthly ledger domain types, the total aggregator, the
//! effective-data selection rule, and per-user currency rates.

pub mod currency;
pub mod ledger;
