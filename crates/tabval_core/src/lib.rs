//! # tabval Core
//!
//! Core data structures for the tabval validation engine.
//!
//! This crate provides the building blocks shared by every call site:
//!
//! - **DataModel / FieldSpec**: a declarative column-rule schema
//! - **ValidationError / ValidationOutcome**: structured per-row reports
//! - **ValidationSummary**: the disclosure-minimized federated result
//! - **Delimiter / Settings**: small value types shared by the transports
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{FieldSpecBuilder, FieldType, ModelBuilder};
//!
//! let model = ModelBuilder::new("patients")
//!     .field(FieldSpecBuilder::new("id", FieldType::Integer).required().build())
//!     .build();
//!
//! assert!(model.check_definition().is_ok());
//! ```

pub mod builder;
pub mod config;
pub mod delimiter;
pub mod error;
pub mod model;
pub mod report;

pub use builder::*;
pub use config::*;
pub use delimiter::*;
pub use error::*;
pub use model::*;
pub use report::*;
