//! core/mod.rs
//!
//! The brain of the app:
//! - Decide which paths go into the file list
//! - Read/write tags and cover art (metadata IO)
//! - Run multi-file jobs on the background worker
//! - Return plain data structs for the GUI to render
//!
//! No Iced imports anywhere under `core`.

pub mod batch;
pub mod cover;
pub mod error;
pub mod formats;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod rename;
pub mod tags;
pub mod types;
pub mod worker;
