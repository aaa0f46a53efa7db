pub mod decompressor;
pub mod downloader;
pub mod error;
#[cfg(feature = "plotting")]
pub mod plot;
pub mod reader;
