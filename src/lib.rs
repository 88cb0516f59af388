//! StockPulse signal dashboard.
//!
//! Classifies precomputed per-symbol trading signals into display cards and
//! rolls them up into universe-level statistics.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
