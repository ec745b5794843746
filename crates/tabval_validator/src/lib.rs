//! # tabval Validator
//!
//! The chunked schema-validation engine. This crate provides the core
//! validation logic for checking tabular data against declarative data
//! models:
//!
//! - **Engine** ([`validate`]): applies a model to one chunk of raw rows,
//!   returning violations as data, never as errors
//! - **Orchestrator** ([`ValidationStream`]): drives chunked reads with
//!   global row numbering, cap enforcement, and fault-tolerant emission
//! - **Registry** ([`ModelRegistry`]): one-time-populated, read-only model
//!   cache
//! - **Summarizer** ([`validate_data`]): the privacy-preserving federated
//!   entrypoint
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tabval_core::{Delimiter, FieldSpecBuilder, FieldType, ModelBuilder};
//! use tabval_validator::ValidationStream;
//!
//! let model = Arc::new(
//!     ModelBuilder::new("patients")
//!         .field(FieldSpecBuilder::new("id", FieldType::Integer).required().build())
//!         .build(),
//! );
//!
//! let csv = "id,age\n1,30\n,40\n";
//! let stream =
//!     ValidationStream::new(csv.as_bytes(), Delimiter::Comma, model, 100, None).unwrap();
//! let items: Vec<_> = stream.collect();
//! assert_eq!(items.len(), 1); // the row with the missing id
//! ```

mod batch;
mod constraints;
pub mod engine;
mod error;
mod registry;
mod stream;
mod summary;

pub use batch::RowBatch;
pub use engine::validate;
pub use error::ValidateError;
pub use registry::ModelRegistry;
pub use stream::ValidationStream;
pub use summary::{summarize, validate_data};
