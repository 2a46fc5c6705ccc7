use crate::normalize::{REPAIR_RULES, RepairRule};
use crate::resolver::PLACEHOLDER_MARKER;
use crate::*;

fn rule(name: &str) -> RepairRule {
    REPAIR_RULES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
        .unwrap()
}

#[test]
fn extract_prefers_the_mermaid_fence() {
    let raw = "Here is your architecture:\n```mermaid\nflowchart TD\n    A --> B\n```";
    assert_eq!(extract_diagram_source(raw), "flowchart TD\n    A --> B");
}

#[test]
fn extract_falls_back_to_the_flowchart_keyword() {
    let raw = "Some preamble text.\nflowchart LR\n    A --> B";
    assert_eq!(extract_diagram_source(raw), "flowchart LR\n    A --> B");
}

#[test]
fn extract_recognizes_graph_with_a_direction_token() {
    let raw = "blah blah\ngraph LR\n    A --> B\ntrailing";
    let out = extract_diagram_source(raw);
    assert!(out.starts_with("graph LR"));
}

#[test]
fn extract_ignores_graph_without_a_direction_token() {
    // "graph" alone is prose, not a diagram declaration.
    let raw = "a graph of usage over time";
    assert_eq!(extract_diagram_source(raw), raw);
}

#[test]
fn extract_passes_unrecognized_text_through() {
    let raw = "no diagram here at all";
    assert_eq!(extract_diagram_source(raw), raw);
}

#[test]
fn extract_strips_residual_fence_markers() {
    let raw = "```mermaid\nflowchart TD\n    A --> B\n```";
    let out = extract_diagram_source(raw);
    assert!(!out.contains("```"));
}

#[test]
fn extract_resolves_service_labels() {
    let raw = "```mermaid\nflowchart TD\n    A[Cloud Run] --> B[Cloud SQL]\n```";
    let out = extract_diagram_source(raw);
    assert!(out.contains(&format!(
        "cloudrun\n{PLACEHOLDER_MARKER}\n{PLACEHOLDER_MARKER}"
    )));
    assert!(out.contains(&format!(
        "cloudsql\n{PLACEHOLDER_MARKER}\n{PLACEHOLDER_MARKER}"
    )));
}

#[test]
fn repair_prepends_a_missing_header() {
    let out = repair_source("A[Start] --> B[End]");
    assert_eq!(out, "flowchart TD\nA[Start] --> B[End]");
}

#[test]
fn repair_keeps_an_existing_header() {
    let out = repair_source("graph LR\nA[Start] --> B[End]");
    assert!(out.starts_with("graph LR"));
    assert!(!out.contains("flowchart TD"));
}

#[test]
fn repair_rewrites_decision_nodes_to_quoted_brackets() {
    let fix = rule("rewrite-decision-nodes");
    assert_eq!(fix("B{Is valid?}"), "B[\"Is valid?\"]");
    assert_eq!(fix("A --> B{Is valid?} --> C"), "A --> B[\"Is valid?\"] --> C");
}

#[test]
fn decision_rewrite_skips_comments_and_subgraph_lines() {
    let fix = rule("rewrite-decision-nodes");
    let source = "%% note{not a node}\nsubgraph cluster{x}\nend";
    assert_eq!(fix(source), source);
}

#[test]
fn repair_spaces_out_arrows() {
    let fix = rule("space-around-arrows");
    assert_eq!(fix("A-->B"), "A --> B");
    assert_eq!(fix("A==>B"), "A ==> B");
    assert_eq!(fix("A--xB"), "A --x B");
    // Already-spaced arrows are untouched.
    assert_eq!(fix("A --> B"), "A --> B");
}

#[test]
fn repair_appends_missing_subgraph_ends() {
    let out = repair_source("flowchart TD\nsubgraph one\n    A --> B");
    assert!(out.ends_with("\nend"));
}

#[test]
fn repair_leaves_surplus_ends_alone() {
    let source = "flowchart TD\nA --> B\nend";
    assert_eq!(repair_source(source), source);
}

#[test]
fn repair_counts_nested_subgraphs() {
    let out = repair_source("flowchart TD\nsubgraph outer\nsubgraph inner\n    A --> B\nend");
    let ends = out.lines().filter(|l| l.trim() == "end").count();
    assert_eq!(ends, 2);
}

#[test]
fn repair_is_idempotent() {
    let inputs = [
        "A-->B{Is valid?}",
        "subgraph web\n  A[Cloud Run]-->B",
        "flowchart TD\n    A --> B",
        "",
    ];
    for input in inputs {
        let once = repair_source(input);
        assert_eq!(repair_source(&once), once, "input: {input:?}");
    }
}

#[test]
fn repair_fixes_a_typical_broken_source_in_one_pass() {
    let out = repair_source("A[Web]-->B{Cache hit?}\nB-->C[Serve]");
    assert_eq!(
        out,
        "flowchart TD\nA[Web] --> B[\"Cache hit?\"]\nB --> C[Serve]"
    );
}

#[test]
fn normalized_source_records_whether_repair_changed_anything() {
    let untouched = NormalizedSource::new("flowchart TD\nA --> B");
    assert!(!untouched.was_repaired());

    let fixed = NormalizedSource::new("A-->B");
    assert!(fixed.was_repaired());
    assert_eq!(fixed.original, "A-->B");
    assert_eq!(fixed.repaired, "flowchart TD\nA --> B");
}
