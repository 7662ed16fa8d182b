//! Utility functions for short codes and URL text handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_scanner`] - URL extraction and span substitution
//! - [`domain_extractor`] - Host name extraction
//! - [`query_params`] - Query parameter stripping and appending

pub mod code_generator;
pub mod domain_extractor;
pub mod query_params;
pub mod url_scanner;
