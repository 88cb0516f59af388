//! Signal classification and aggregation.

pub mod aggregation;
pub mod classifier;
pub mod companies;
pub mod taxonomy;
pub mod volatility;

pub use aggregation::*;
pub use classifier::*;
pub use companies::*;
pub use taxonomy::*;
pub use volatility::*;
