//! Feed ingestion, per-record processing and document output.

pub mod ingestion;
pub mod output;
pub mod processing;
