//! Domain layer containing the conversion model and rule tables.
//!
//! Nothing here performs I/O. Services in [`crate::application::services`]
//! combine these pieces, and `crate::infrastructure` implements the
//! repository traits.
//!
//! # Architecture
//!
//! - [`entities`] - Networks, records and counters
//! - [`registry`] - Known retailer domains and keyword heuristics
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod registry;
pub mod repositories;
