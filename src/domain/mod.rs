//! Domain layer: link records and tree materialization
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod flatten;
pub mod record;
pub mod tree;
pub mod validate;

pub use arena::{NodeData, TreeArena};
pub use builder::{BuildOutput, BuildReport, DropReason, DroppedRecord, TreeBuilder};
pub use error::DomainError;
pub use flatten::{flatten, RenderEntry};
pub use record::{FlatRecord, RecordDraft};
pub use tree::{Tree, TreeNode, ROOT_NAME};
pub use validate::{duplicate_names, is_valid_url, validate_new_record};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Unresolvable variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
