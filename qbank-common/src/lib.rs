//! # QBank Common Library
//!
//! Shared code for the QBank quiz service:
//! - Canonical question records and dataset collection
//! - Error types
//! - Configuration resolution

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{AnswerOptions, Dataset, Question, RowUpdate};
