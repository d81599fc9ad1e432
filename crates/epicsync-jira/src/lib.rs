//! Jira integration for epicsync.
//!
//! [`client::JiraClient`] creates epics and stories through the Jira REST API
//! v2 and keeps a log of what it created. [`sync::sync_epics`] drives a whole
//! run, creating each epic and then, only if that succeeded, its stories.

pub mod client;
pub mod error;
pub mod payload;
pub mod report;
pub mod sync;
pub mod transport;
