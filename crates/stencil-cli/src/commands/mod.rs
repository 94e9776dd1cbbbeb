//! Command handlers, one module per command family.

pub mod completions;
pub mod config;
pub mod init;
pub mod make;
pub mod schema;
