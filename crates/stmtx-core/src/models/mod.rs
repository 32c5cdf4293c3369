//! Data models: normalized ledgers, extraction reports and configuration.

pub mod config;
pub mod ledger;
