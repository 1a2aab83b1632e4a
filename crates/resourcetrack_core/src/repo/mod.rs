//! Data-loading seam and the indexed in-memory domain store.
//!
//! # Responsibility
//! - Define the `DataSource` contract every dataset backend implements.
//! - Validate and index a loaded `Dataset` into a read-only `DomainStore`.
//! - Answer id and foreign-key lookups without exposing index details.
//!
//! # Invariants
//! - A store is immutable after construction.
//! - Unknown ids resolve to `None` or an empty sequence, never an error.
//! - Loading is the only failable path in this layer.

pub mod seed;
pub mod source;
pub mod store;
