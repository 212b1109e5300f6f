//! Command implementations for the bundlekit CLI

pub mod build;
pub mod completions;
pub mod export;
pub mod helpers;
pub mod query;
pub mod version;
