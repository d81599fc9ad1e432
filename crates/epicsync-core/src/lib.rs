//! Core types for epicsync.
//!
//! This crate holds the epic and user story model, the markdown field
//! extractor that builds those records, and the directory loader that walks
//! an epics tree.

pub mod enums;
pub mod loader;
pub mod markdown;
pub mod model;
