pub mod config;
pub mod logging;

pub mod checksum;
pub mod context;
pub mod downloader;
pub mod error;
pub mod http;
pub mod manifest;
pub mod pipeline;
pub mod prompt;
pub mod registry;
pub mod release;
pub mod url_model;

pub use error::Error;
