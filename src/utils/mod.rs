//! Shared helpers for the outer surfaces.

pub mod validation;
