//! Tree builder turning flat parent-referencing links into a rooted tree.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use generational_arena::Index;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::record::FlatRecord;
use crate::domain::tree::Tree;

/// Why a record could not be attached to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    /// The parent name does not occur anywhere in the input.
    MissingParent,
    /// The parent exists but never got attached (cycle, or below a dropped record).
    Unreachable,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingParent => write!(f, "parent does not exist"),
            DropReason::Unreachable => write!(f, "parent never resolves (cycle?)"),
        }
    }
}

/// A record left out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedRecord {
    pub name: String,
    pub parent_name: String,
    pub reason: DropReason,
}

/// Diagnostics of a single build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Records not attached anywhere, in pending order
    pub dropped: Vec<DroppedRecord>,
    /// Resolution attempts spent
    pub attempts: usize,
    /// Attempt budget the build ran with
    pub budget: usize,
    /// True if resolution stopped because the budget ran out
    pub budget_exhausted: bool,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn dropped_names(&self) -> Vec<&str> {
        self.dropped.iter().map(|d| d.name.as_str()).collect()
    }
}

/// Result of [`TreeBuilder::build`]: a best-effort tree plus its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub tree: Tree,
    pub report: BuildReport,
}

/// Materializes flat link records into a [`Tree`].
///
/// Records without a parent hang off the synthetic root in input order. The
/// rest sit in a FIFO pending queue: each attempt pops the front record and
/// attaches it if its parent is already materialized, otherwise requeues it
/// at the back. Attempts are bounded by a budget that grows quadratically
/// with the number of pending records, enough for any acyclic input whose
/// parents all exist. Whatever is still pending when the queue stalls or the
/// budget runs out is dropped and reported, never raised as an error.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    attempt_budget: Option<usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the quadratic default budget.
    pub fn with_attempt_budget(budget: usize) -> Self {
        Self {
            attempt_budget: Some(budget),
        }
    }

    /// Default budget for `pending` unresolved records: `pending²`.
    ///
    /// A FIFO sweep over `k` pending records resolves at least one of them on
    /// acyclic input, so `n + (n-1) + .. + 1` attempts always suffice.
    pub fn default_budget(pending: usize) -> usize {
        pending.saturating_mul(pending)
    }

    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&self, records: &[FlatRecord]) -> BuildOutput {
        let mut arena = TreeArena::with_capacity(records.len() + 1);
        let mut index: HashMap<&str, Index> = HashMap::with_capacity(records.len());
        let mut pending: VecDeque<&FlatRecord> = VecDeque::new();

        // Partition: root-level nodes attach immediately, in input order
        for record in records {
            match record.parent_name.as_deref() {
                None => {
                    let idx = arena.insert_node(node_data(record), arena.root());
                    register(&mut index, record, idx);
                }
                Some(_) => pending.push_back(record),
            }
        }
        debug!(
            "partitioned: {} root-level, {} pending",
            arena.len(),
            pending.len()
        );

        let budget = self
            .attempt_budget
            .unwrap_or_else(|| Self::default_budget(pending.len()));
        let mut attempts = 0;
        // Attempts since the last successful attach; a full sweep without
        // progress means nothing left can ever resolve.
        let mut stalled = 0;

        while !pending.is_empty() && attempts < budget && stalled < pending.len() {
            let Some(record) = pending.pop_front() else {
                break;
            };
            attempts += 1;

            let parent = record
                .parent_name
                .as_deref()
                .and_then(|parent| index.get(parent).copied());
            match parent {
                Some(parent_idx) => {
                    let idx = arena.insert_node(node_data(record), parent_idx);
                    register(&mut index, record, idx);
                    stalled = 0;
                    trace!("attached {} after {} attempts", record.name, attempts);
                }
                None => {
                    pending.push_back(record);
                    stalled += 1;
                }
            }
        }

        // exhausted only if the budget cut a sweep short, not after a stall
        let budget_exhausted = !pending.is_empty() && stalled < pending.len();
        let dropped = classify_dropped(records, pending);
        if !dropped.is_empty() {
            debug!(
                "dropped {} unresolvable link(s) after {} attempts (budget {}): {}",
                dropped.len(),
                attempts,
                budget,
                dropped
                    .iter()
                    .map(|d| d.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        BuildOutput {
            tree: arena.into_tree(),
            report: BuildReport {
                dropped,
                attempts,
                budget,
                budget_exhausted,
            },
        }
    }
}

fn node_data(record: &FlatRecord) -> NodeData {
    NodeData {
        name: record.name.clone(),
        url: record.url.clone(),
    }
}

/// First materialized node keeps a duplicated name.
fn register<'a>(index: &mut HashMap<&'a str, Index>, record: &'a FlatRecord, idx: Index) {
    if index.contains_key(record.name.as_str()) {
        debug!("duplicate link name {:?}, keeping first", record.name);
        return;
    }
    index.insert(record.name.as_str(), idx);
}

fn classify_dropped(records: &[FlatRecord], pending: VecDeque<&FlatRecord>) -> Vec<DroppedRecord> {
    if pending.is_empty() {
        return Vec::new();
    }
    let known: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();
    pending
        .into_iter()
        .filter_map(|record| {
            let parent_name = record.parent_name.clone()?;
            let reason = if known.contains(parent_name.as_str()) {
                DropReason::Unreachable
            } else {
                DropReason::MissingParent
            };
            Some(DroppedRecord {
                name: record.name.clone(),
                parent_name,
                reason,
            })
        })
        .collect()
}
