//! # Investigator Desk
//!
//! The desk keeps a directory of investigations on disk, one JSON file per
//! investigation, and holds the authoritative in-memory copy of each one.
//! Callers create or look up an investigation here, mutate it through the
//! `authority_model` API and ask the desk to persist it again.
//!
//! ## Core Components
//!
//! - **desk**: Directory scan, create/get/list/save and the configuration
//! - **report**: Plain-text investigation reports
//! - **error**: The error type shared by desk operations
//!
//! ## Example
//!
//! ```no_run
//! use authority_model::{AuthoritySource, Evidence};
//! use investigator_desk::{Desk, DeskConfig};
//!
//! # fn main() -> investigator_desk::Result<()> {
//! let mut desk = Desk::open(DeskConfig::default())?;
//! let now = desk.now();
//! let inv = desk.create_investigation("INV-001", "Corporate structure", "Who decides?")?;
//! inv.add_authority_source(AuthoritySource::new("AUTH-BOARD", "Board", "Governing body", "Governance", now))?;
//! inv.add_evidence("AUTH-BOARD", Evidence::new("Legal Document", "Fiduciary duty", now).with_source("Bylaws IV"))?;
//! desk.persist("INV-001")?;
//! println!("{}", desk.generate_report("INV-001"));
//! # Ok(())
//! # }
//! ```

pub mod desk;
pub mod error;
pub mod report;

pub use desk::*;
pub use error::*;
pub use report::*;
