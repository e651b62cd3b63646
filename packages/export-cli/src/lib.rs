//! Shared modules for the export binaries.

pub mod config;
pub mod report;
