//! Response-shape normalization helpers.

pub mod envelope;
pub mod fields;
