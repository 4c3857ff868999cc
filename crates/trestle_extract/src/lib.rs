//! Interface extraction for the Trestle wrapper generator.
//!
//! This crate walks an elaborated module's member tree and produces the
//! [`Metadata`] that drives wrapper generation: name-keyed maps of signals,
//! records, pins, and endpoints, plus the dotted-path map from signal unique
//! identifiers back to member paths. It also renders the structural layout
//! descriptors embedded into generated source.

#![warn(missing_docs)]

mod describe;
mod metadata;

pub use describe::{describe_endpoint, describe_layout, describe_record};
pub use metadata::{extract, Extraction, Metadata};
