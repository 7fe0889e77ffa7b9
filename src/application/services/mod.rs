//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Selector, etc.)
//! but are themselves concrete structs, not traits.

mod links;

pub use links::{DeletableLink, LinkService, LinkStore, LinkView, STORE_VERSION};
