pub mod config;
pub mod error;
pub mod named_blob;
pub mod password;
pub mod report;
