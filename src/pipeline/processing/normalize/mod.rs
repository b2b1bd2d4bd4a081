//! Per-record normalization: dates, optional-field projection and text cleanup.

pub mod dates;
pub mod projector;
pub mod sanitizer;
pub mod transformer;

pub use transformer::EventTransformer;
