//! Tests for TreeBuilder

use linktree::domain::{flatten, DropReason, FlatRecord, TreeBuilder, TreeNode, ROOT_NAME};
use linktree::util::testing;

fn names(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

/// Every record with its parent, sorted, as seen in the tree.
fn attachments(records: &[FlatRecord]) -> Vec<(String, Option<String>)> {
    let output = TreeBuilder::new().build(records);
    let mut pairs: Vec<_> = output
        .tree
        .iter()
        .map(|n| (n.name.clone(), n.parent_name.clone()))
        .collect();
    pairs.sort();
    pairs
}

// ============================================================
// Root Invariant
// ============================================================

#[test]
fn given_mixed_records_when_building_then_root_children_are_parentless_records_in_input_order() {
    testing::init_test_setup();
    let records = vec![
        FlatRecord::new("b-child").with_parent("B"),
        FlatRecord::new("B"),
        FlatRecord::new("a-child").with_parent("A"),
        FlatRecord::new("A"),
        FlatRecord::new("C").with_url("https://c.example.com"),
    ];

    let output = TreeBuilder::new().build(&records);

    assert_eq!(output.tree.root().name, ROOT_NAME);
    assert!(output.tree.root().url.is_none());
    assert_eq!(names(output.tree.children()), vec!["B", "A", "C"]);
    assert!(output.tree.children().iter().all(|n| n.parent_name.is_none()));
}

// ============================================================
// Resolution Correctness
// ============================================================

#[test]
fn given_shuffled_resolvable_records_when_building_then_each_appears_once_under_its_parent() {
    let records = vec![
        FlatRecord::new("leaf2").with_parent("mid2"),
        FlatRecord::new("mid1").with_parent("top"),
        FlatRecord::new("leaf1").with_parent("mid1"),
        FlatRecord::new("mid2").with_parent("top"),
        FlatRecord::new("top"),
        FlatRecord::new("other"),
        FlatRecord::new("deep").with_parent("leaf2"),
    ];

    let output = TreeBuilder::new().build(&records);

    assert!(output.report.is_clean());
    assert_eq!(output.tree.len(), records.len());
    let mut expected: Vec<_> = records
        .iter()
        .map(|r| (r.name.clone(), r.parent_name.clone()))
        .collect();
    expected.sort();
    assert_eq!(attachments(&records), expected);
    assert_eq!(output.tree.depth(), 4);
}

#[test]
fn given_long_chain_with_parents_after_children_when_building_then_resolves_completely() {
    let n = 200;
    let mut records: Vec<FlatRecord> = (1..n)
        .rev()
        .map(|i| FlatRecord::new(format!("link-{i}")).with_parent(format!("link-{}", i - 1)))
        .collect();
    records.push(FlatRecord::new("link-0"));

    let output = TreeBuilder::new().build(&records);

    assert!(output.report.is_clean(), "dropped: {:?}", output.report.dropped);
    assert_eq!(output.tree.len(), n);
    assert_eq!(output.tree.depth(), n);
    assert!(output.report.attempts <= output.report.budget);
}

// ============================================================
// Dangling Parents and Cycles
// ============================================================

#[test]
fn given_dangling_parent_when_building_then_reports_single_dropped_record() {
    let records = vec![
        FlatRecord::new("A"),
        FlatRecord::new("B").with_parent("MISSING"),
    ];

    let output = TreeBuilder::new().build(&records);

    assert_eq!(names(output.tree.children()), vec!["A"]);
    assert!(output.tree.children()[0].children.is_empty());
    assert_eq!(output.report.dropped_names(), vec!["B"]);
    assert_eq!(output.report.dropped[0].parent_name, "MISSING");
    assert_eq!(output.report.dropped[0].reason, DropReason::MissingParent);
    assert!(!output.report.budget_exhausted);
}

#[test]
fn given_mutual_parents_when_building_then_terminates_with_empty_root() {
    let records = vec![
        FlatRecord::new("A").with_parent("B"),
        FlatRecord::new("B").with_parent("A"),
    ];

    let output = TreeBuilder::new().build(&records);

    assert!(output.tree.is_empty());
    let mut dropped = output.report.dropped_names();
    dropped.sort();
    assert_eq!(dropped, vec!["A", "B"]);
}

#[test]
fn given_cycle_with_descendant_when_building_then_drops_whole_subgraph_but_keeps_rest() {
    let records = vec![
        FlatRecord::new("ok"),
        FlatRecord::new("x").with_parent("z"),
        FlatRecord::new("y").with_parent("x"),
        FlatRecord::new("z").with_parent("y"),
        FlatRecord::new("hanger").with_parent("y"),
        FlatRecord::new("ok-child").with_parent("ok"),
        FlatRecord::new("self").with_parent("self"),
    ];

    let output = TreeBuilder::new().build(&records);

    let shown: Vec<_> = output.tree.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(shown, vec!["ok", "ok-child"]);
    let mut dropped = output.report.dropped_names();
    dropped.sort();
    assert_eq!(dropped, vec!["hanger", "self", "x", "y", "z"]);
    assert!(output
        .report
        .dropped
        .iter()
        .all(|d| d.reason == DropReason::Unreachable));
    assert!(!output.report.budget_exhausted);
}

#[test]
fn given_exhausted_budget_when_building_then_keeps_already_attached_nodes() {
    let records = vec![
        FlatRecord::new("root"),
        FlatRecord::new("first").with_parent("root"),
        FlatRecord::new("third").with_parent("second"),
        FlatRecord::new("second").with_parent("first"),
    ];

    let output = TreeBuilder::with_attempt_budget(2).build(&records);

    assert!(output.report.budget_exhausted);
    assert_eq!(output.report.attempts, 2);
    assert!(output.tree.contains("first"));
    assert!(!output.tree.contains("third"));
    assert_eq!(output.report.dropped_names(), vec!["second", "third"]);
}

// ============================================================
// Idempotence and End-to-End
// ============================================================

#[test]
fn given_same_snapshot_when_rebuilding_twice_then_render_sequences_are_identical() {
    let records = vec![
        FlatRecord::new("child").with_parent("parent"),
        FlatRecord::new("parent"),
        FlatRecord::new("sibling").with_parent("parent"),
        FlatRecord::new("lost").with_parent("gone"),
    ];
    let builder = TreeBuilder::new();

    let first = flatten(&builder.build(&records).tree);
    let second = flatten(&builder.build(&records).tree);

    assert_eq!(first, second);
}

#[test]
fn given_work_and_email_when_building_then_email_hangs_under_work() {
    let records = vec![
        FlatRecord::new("Work"),
        FlatRecord::new("Email")
            .with_parent("Work")
            .with_url("https://mail.example.com"),
    ];

    let output = TreeBuilder::new().build(&records);

    assert_eq!(names(output.tree.children()), vec!["Work"]);
    let work = &output.tree.children()[0];
    assert_eq!(names(&work.children), vec!["Email"]);
    assert_eq!(
        work.children[0].url.as_deref(),
        Some("https://mail.example.com")
    );
}
