//! CLI command implementations

pub mod mirror;

pub use mirror::MirrorArgs;
