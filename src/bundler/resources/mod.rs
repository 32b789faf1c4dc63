//! Bundle resources.

pub mod icons;
