//! bundlekit - content-addressed bundle packager
//!
//! Partitions a tree of content files into bundles following ordered
//! package rules, builds one archive per bundle, names every archive after
//! its content hash and records the result in a manifest with a tag index
//! and a dependency graph.
//!
//! The library surface is organized as the pipeline runs:
//! - [`collector`]: walks rule roots, first rule wins
//! - [`strategy`]: partitions collected items into bundle builds
//! - [`archive`]: the archive builder seam and the tar.gz builder
//! - [`build`]: the pipeline, manifest assembly, reconciliation, export
//! - [`manifest`]: manifest.json / version.json and the read-only index

pub mod archive;
pub mod build;
pub mod cli;
pub mod collector;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod progress;
pub mod strategy;

pub use error::{BundleKitError, Result};
