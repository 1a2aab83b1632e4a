//! Sort and search over dashboard tables.
//!
//! # Responsibility
//! - Provide one stable, typed sorting routine and one substring filter that
//!   every list view shares.
//! - Declare each table's sortable and searchable fields once, as enums with
//!   their extractors.
//!
//! # Invariants
//! - Sorting is stable; equal keys keep their input order.
//! - An empty query keeps every item in its original order.

pub mod fields;
pub mod filter;
pub mod sort;
