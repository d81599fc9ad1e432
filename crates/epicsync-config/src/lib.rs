//! Configuration management for epicsync.
//!
//! Settings are layered with figment: built-in defaults, an optional YAML
//! file, the `JIRA_*` / `EPICS_DIR` environment variables, then command-line
//! overrides.

pub mod config;
