//! Shared data models spanning the dashboard layers.

pub mod signal;

pub use signal::{RawSignal, SignalBatch, Trend};
