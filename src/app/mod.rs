pub mod ports;
pub mod publish_use_case;

pub use publish_use_case::{PublishReport, PublishUseCase, PublishedDocuments};
