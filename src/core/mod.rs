//! Core pipeline logic for Stratus.
//!
//! This module contains the storage-key scheme, the column selector, the
//! observation normalizer and the export pipeline. Everything here works
//! against the adapter traits, so the logic is testable without AWS or a
//! running database.
//!
//! # Modules
//!
//! - [`keys`] - Storage key generation for staged objects and export artifacts
//! - [`columns`] - Validation of requested columns against the live schema
//! - [`normalize`] - Decomposition of staged observations into relational rows
//! - [`export`] - Projection, CSV serialization, staging and link generation
//!
//! # Export Workflow
//!
//! The typical export request:
//!
//! 1. **Snapshot**: Read the live schema for the three joined tables
//! 2. **Validate**: Resolve requested `table:column` references (or `*`)
//! 3. **Project**: Run the validated select-list over the join
//! 4. **Serialize**: Write header + rows as escaped CSV
//! 5. **Stage**: Store the artifact under a collision-free key
//! 6. **Sign**: Generate a short-lived download link

pub mod columns;
pub mod export;
pub mod keys;
pub mod normalize;

pub use columns::parse_columns;
pub use export::{serialize_result_set, ExportOutcome, ExportPipeline};
pub use keys::{export_key, staged_object_key};
pub use normalize::Normalizer;
