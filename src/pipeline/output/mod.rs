pub mod document;
pub mod writer;

pub use document::{DocumentBuilder, EventsDocumentV1, EventsDocumentV2};
pub use writer::to_pretty_json;
