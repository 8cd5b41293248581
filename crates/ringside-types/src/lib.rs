//! Ringside Types - Canonical domain types for the boxing ring
//!
//! This crate contains the foundational types shared by every other
//! ringside crate, with zero dependencies on them:
//!
//! - Boxer identity, validated construction and stored records
//! - Weight class classification
//! - Fight outcomes recorded against a boxer
//! - The `BoxerStore` port implemented by the database layer
//!
//! # Invariants
//!
//! 1. A `Boxer` value can only be obtained through validation
//! 2. Weight class is never stored, it is always recomputed from weight
//! 3. Cumulative stats are owned by the store and only move through
//!    `BoxerStore::update_stats`

pub mod boxer;
pub mod error;
pub mod store;
pub mod weight_class;

pub use boxer::*;
pub use error::*;
pub use store::*;
pub use weight_class::*;
