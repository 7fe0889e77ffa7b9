//! linktree: flat, parent-referencing links materialized into a tree.
//!
//! The core lives in [`domain`]: [`domain::TreeBuilder`] turns an unordered
//! record list into a rooted tree, [`domain::flatten`] projects that tree into
//! breadth-first render entries.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
