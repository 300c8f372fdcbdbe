//! # Authority Model
//!
//! The data model for investigations that target sources of authority.
//! This crate holds the in-memory records and their invariants; it does not
//! touch the filesystem. Persistence and reporting live in `investigator_desk`.
//!
//! ## Core Components
//!
//! - **sources**: Authority sources and the evidence gathered against them
//! - **investigation**: Named cases bundling sources, connections and notes
//! - **time**: Timestamps and the injectable clock used to stamp new records

pub mod error;
pub mod investigation;
pub mod sources;
pub mod time;

pub use error::*;
pub use investigation::*;
pub use sources::*;
pub use time::*;
