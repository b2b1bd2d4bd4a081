pub mod feed;

pub use feed::decode_feed;
