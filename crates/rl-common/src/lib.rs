//! Rowlens shared types.
//!
//! This crate holds the two things every other crate needs:
//! - [`Dataset`], the immutable in-memory table loaded for a session
//! - the unified [`Error`] taxonomy with stable codes and categories

pub mod dataset;
pub mod error;

pub use dataset::Dataset;
pub use error::{Error, ErrorCategory, Result};
