//! JSON configuration documents consumed by the binaries.
pub mod rect4;
