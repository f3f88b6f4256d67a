//! Common types used across the YoBit client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
