//! Link store service
//!
//! Owns the persisted flat link collection and runs the rebuild pipeline
//! (records → tree → render entries) after every load or mutation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    duplicate_names, flatten, validate_new_record, BuildReport, DomainError, FlatRecord,
    RecordDraft, RenderEntry, Tree, TreeBuilder,
};
use crate::infrastructure::traits::FileSystem;

/// Version tag of the on-disk collection format.
pub const STORE_VERSION: &str = "links-v1";

/// On-disk document: a version tag plus the flat link list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStore {
    pub version: String,
    // omitted when empty so a hand-edited file can start with `[[links]]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<FlatRecord>,
}

impl LinkStore {
    pub fn new(links: Vec<FlatRecord>) -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            links,
        }
    }
}

/// Everything a presenter needs from one rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub tree: Tree,
    pub entries: Vec<RenderEntry>,
    pub report: BuildReport,
    /// Names stored more than once (only possible via direct file edits)
    pub duplicates: Vec<String>,
}

impl LinkView {
    /// Runs build and flatten over a snapshot of the collection.
    pub fn build(records: &[FlatRecord], builder: &TreeBuilder) -> Self {
        let output = builder.build(records);
        let entries = flatten(&output.tree);
        let duplicates = duplicate_names(records);
        if !duplicates.is_empty() {
            debug!("duplicate link names in store: {}", duplicates.join(", "));
        }
        Self {
            tree: output.tree,
            entries,
            report: output.report,
            duplicates,
        }
    }

    /// Links offered for deletion: childless entries, then dropped records.
    ///
    /// Dropped records stay deletable so that broken references can be
    /// cleaned up.
    pub fn deletable(&self) -> Vec<DeletableLink> {
        self.entries
            .iter()
            .filter(|e| !e.has_children)
            .map(|e| DeletableLink {
                name: e.name.clone(),
                label: match &e.parent_name {
                    Some(parent) => format!("{} ({})", e.name, parent),
                    None => e.name.clone(),
                },
            })
            .chain(self.report.dropped.iter().map(|d| DeletableLink {
                name: d.name.clone(),
                label: format!("{} [dropped: {}]", d.name, d.reason),
            }))
            .collect()
    }
}

/// A delete candidate with the label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletableLink {
    pub name: String,
    pub label: String,
}

/// Service managing the link collection file.
pub struct LinkService {
    fs: Arc<dyn FileSystem>,
    store_path: PathBuf,
    builder: TreeBuilder,
}

impl LinkService {
    /// Create a new link service backed by `store_path`.
    pub fn new(fs: Arc<dyn FileSystem>, store_path: PathBuf) -> Self {
        Self {
            fs,
            store_path,
            builder: TreeBuilder::new(),
        }
    }

    /// Replace the tree builder (e.g. to force a small attempt budget).
    pub fn with_builder(mut self, builder: TreeBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Load the flat collection.
    ///
    /// A missing store is initialized with an empty collection.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self) -> ApplicationResult<Vec<FlatRecord>> {
        let path = &self.store_path;
        if !self.fs.exists(path) {
            debug!("load: no store at {}, initializing", path.display());
            self.save(&[])?;
            return Ok(Vec::new());
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::Store {
                path: path.clone(),
                message: "not a regular file".to_string(),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read link store", path)?;
        let store: LinkStore = toml::from_str(&content).map_err(|e| ApplicationError::Store {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if store.version != STORE_VERSION {
            return Err(ApplicationError::UnsupportedVersion {
                path: path.clone(),
                found: store.version,
                expected: STORE_VERSION,
            });
        }
        debug!("load: {} links from {}", store.links.len(), path.display());
        Ok(store.links)
    }

    /// Persist the flat collection atomically.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn save(&self, records: &[FlatRecord]) -> ApplicationResult<()> {
        let path = &self.store_path;
        let content = toml::to_string_pretty(&LinkStore::new(records.to_vec())).map_err(|e| {
            ApplicationError::Store {
                path: path.clone(),
                message: format!("serialize: {e}"),
            }
        })?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create store directory", path)?;
        self.fs
            .write_atomic(path, &content)
            .with_path_context("write link store", path)?;
        Ok(())
    }

    /// Load and rebuild.
    #[instrument(level = "debug", skip(self))]
    pub fn view(&self) -> ApplicationResult<LinkView> {
        let records = self.load()?;
        Ok(LinkView::build(&records, &self.builder))
    }

    /// Validate and append a new link, persist, and rebuild.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&self, draft: &RecordDraft) -> ApplicationResult<(FlatRecord, LinkView)> {
        let mut records = self.load()?;
        let record = validate_new_record(&records, draft)?;
        debug!("add: {:?}", record);
        records.push(record.clone());
        self.save(&records)?;
        Ok((record, LinkView::build(&records, &self.builder)))
    }

    /// Remove a link that has no children in the current tree, persist, and
    /// rebuild.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, name: &str) -> ApplicationResult<(FlatRecord, LinkView)> {
        let mut records = self.load()?;
        let position = records
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| DomainError::RecordNotFound(name.to_string()))?;

        let current = LinkView::build(&records, &self.builder);
        if current.tree.find(name).is_some_and(|node| node.has_children()) {
            return Err(DomainError::HasChildren(name.to_string()).into());
        }

        let removed = records.remove(position);
        debug!("delete: {:?}", removed);
        self.save(&records)?;
        Ok((removed, LinkView::build(&records, &self.builder)))
    }
}
