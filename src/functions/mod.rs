//! Function entry-point handlers
//!
//! One handler per deployed function, each a thin orchestration over the
//! adapter traits. The binaries under `src/bin/` wire these to the Lambda
//! runtime; the handlers themselves know nothing about event envelopes
//! beyond their own trigger payload types, which keeps them testable
//! in-process.
//!
//! # Handlers
//!
//! - [`fetch`] - Fetch one city's current observation and stage it
//! - [`load`] - Normalize one staged observation into the relational store
//! - [`export`] - Authorize and run a CSV export request
//! - [`invoke`] - Fan out one fetch dispatch per tracked city
//! - [`backfill`] - Stage historical observations day by day

pub mod backfill;
pub mod export;
pub mod fetch;
pub mod invoke;
pub mod load;
mod staging;

pub use backfill::BackfillHandler;
pub use export::{ExportHandler, ExportRequest};
pub use fetch::{FetchHandler, FetchRequest};
pub use invoke::InvokeHandler;
pub use load::{LoadHandler, StorageEvent};
