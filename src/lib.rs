//! Runtime serialization core for Fury: the byte-level memory buffer, the
//! class-level security gate, and the codec-layout field grouper.
//!
//! This crate covers the three leaf components a Fury serializer is built
//! on:
//!
//! - [`buffer`]: [`buffer::MemoryBuffer`], a resizable little-endian byte
//!   buffer with a varint framing primitive.
//! - [`checker`]: [`checker::ClassChecker`], the STRICT/WARN allow-list
//!   policy engine that gates every class entering or leaving the
//!   serializer.
//! - [`field_grouper`]: [`field_grouper::FieldGrouper`], the heuristic
//!   that partitions a class's fields into groups small enough for the
//!   host code generator to inline.
//!
//! Schema evolution, non-varint wire dialects, object graph traversal, and
//! reflection mechanics are out of scope; those are the concern of the
//! surrounding serialization driver, not this core.

#![deny(missing_docs)]

pub mod buffer;
pub mod checker;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod field_grouper;

pub use buffer::MemoryBuffer;
pub use checker::{CheckerMode, ClassChecker};
pub use config::FuryConfig;
pub use descriptor::{FieldDescriptor, FieldModifiers, FieldType};
pub use error::{FuryError, Result};
pub use field_grouper::FieldGrouper;
