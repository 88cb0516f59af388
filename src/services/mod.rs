//! External collaborators: fetching signal batches from the backend.

pub mod backend;
pub mod decode;
pub mod signal_source;

pub use backend::HttpSignalSource;
pub use decode::{decode_batch, DecodedBatch, RejectedRecord};
pub use signal_source::{SignalSource, StaticSignalSource};
