//! Data Transfer Objects
//!
//! Request and response structures for the API.

pub mod boxer;
pub mod common;
pub mod ring;

pub use boxer::*;
pub use common::*;
pub use ring::*;
