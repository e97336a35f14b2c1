//! Unique identifiers for Tollgate entities.
//!
//! Strongly-typed UUID identifiers built on
//! [`domain-key`](https://crates.io/crates/domain-key) `Uuid<D>` wrappers.
//! Each identifier type is parameterized by its own domain marker, so an
//! [`ExecutionId`] can never be passed where a [`NodeId`] is expected.
//!
//! All ID types are `Copy` (16 bytes) and support:
//! - `v4()` for random UUID generation
//! - `nil()` for zero-valued default
//! - `parse(&str)` for string parsing
//! - Full serde support (serializes as UUID string)
//! - `Display`, `FromStr`, `Eq`, `Ord`, `Hash`

use domain_key::define_uuid;

pub use domain_key::UuidParseError;

define_uuid!(pub ExecutionIdDomain => ExecutionId);
define_uuid!(pub WorkflowIdDomain => WorkflowId);
define_uuid!(pub NodeIdDomain => NodeId);
