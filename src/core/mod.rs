//! Presentation layer: dashboard composition and the HTTP surface

pub mod dashboard;
pub mod http;

pub use dashboard::*;
pub use http::*;
