pub mod file_sink;
pub mod http_feed;

pub use file_sink::FsArtifactSink;
pub use http_feed::ReqwestFeed;
