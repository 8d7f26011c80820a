//! Event-to-tree reduction.

/// Tree builder state machine.
pub mod core;
/// Structural error types.
pub mod error;
/// Text normalization.
pub mod text;

pub use self::core::{BuilderState, MAX_DEPTH, TreeBuilder, build_tree};
pub use error::BuildError;
pub use text::normalize_whitespace;
