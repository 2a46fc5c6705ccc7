//! Diagram text normalization: extracting the graph-description block from
//! noisy generated text, and best-effort syntax repair for sources the
//! external conversion step rejects.
//!
//! Repair is deliberately heuristic: an ordered list of pure text-to-text
//! rules, not a parser. It is deterministic and idempotent, and it is only
//! run after an initial parse attempt has already failed.

use crate::resolver::resolve_service_labels;
use regex::Regex;
use std::sync::OnceLock;

/// Provenance record for one render attempt: the source as extracted, and the
/// source after repair. Discarded per attempt, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSource {
    pub original: String,
    pub repaired: String,
}

impl NormalizedSource {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let repaired = repair_source(&original);
        Self { original, repaired }
    }

    /// Whether repair changed anything. Drives the "automatically fixed"
    /// advisory and the original-vs-repaired diff shown to the user.
    pub fn was_repaired(&self) -> bool {
        self.original != self.repaired
    }
}

fn graph_direction_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"graph\s+(LR|RL|TB|BT)").expect("valid regex"))
}

/// Locates the embedded graph-description block inside raw generated text and
/// runs the label resolver over it.
///
/// Preference order: an explicit ```` ```mermaid ```` fence; otherwise the
/// first recognized diagram keyword (`flowchart`, `sequenceDiagram`,
/// `classDiagram`, or `graph` followed by a direction token), taking
/// everything from the keyword onward. Residual fence markers are stripped.
///
/// Fails softly: with no fence and no keyword, the input passes through (the
/// repair stage later supplies a default diagram type).
pub fn extract_diagram_source(raw: &str) -> String {
    let mut text = if let Some(idx) = raw.find("```mermaid") {
        raw[idx + "```mermaid".len()..].to_string()
    } else if let Some(idx) = raw.find("flowchart") {
        raw[idx..].to_string()
    } else if let Some(idx) = raw.find("sequenceDiagram") {
        raw[idx..].to_string()
    } else if let Some(idx) = raw.find("classDiagram") {
        raw[idx..].to_string()
    } else if let Some(m) = graph_direction_regex().find(raw) {
        raw[m.start()..].to_string()
    } else {
        raw.to_string()
    };

    text = text.replace("```", "");
    resolve_service_labels(text.trim())
}

/// One repair rule: a pure, independently testable text transform.
pub type RepairRule = fn(&str) -> String;

/// The repair rules, in application order. The order is significant: the
/// header rule must run before line rules so a prepended declaration is not
/// itself rewritten, and `end`-balancing counts lines produced by the earlier
/// rules.
pub const REPAIR_RULES: &[(&str, RepairRule)] = &[
    ("ensure-diagram-header", ensure_diagram_header),
    ("rewrite-decision-nodes", rewrite_decision_nodes),
    ("space-around-arrows", space_around_arrows),
    ("sanitize-node-ids", sanitize_node_ids),
    ("balance-subgraph-ends", balance_subgraph_ends),
];

/// Applies every repair rule in order. Deterministic and idempotent;
/// `repair_source(repair_source(x)) == repair_source(x)` for any input.
pub fn repair_source(source: &str) -> String {
    let mut text = source.trim().to_string();
    for (name, rule) in REPAIR_RULES {
        let fixed = rule(&text);
        if fixed != text {
            tracing::debug!(rule = name, "repair rule changed diagram source");
        }
        text = fixed;
    }
    text
}

/// Rule 1: prepend a default flow-chart declaration when the text does not
/// begin with a recognized diagram keyword.
fn ensure_diagram_header(text: &str) -> String {
    if text.is_empty() {
        return "flowchart TD".to_string();
    }
    let starts_known = ["graph", "flowchart", "sequenceDiagram", "classDiagram"]
        .iter()
        .any(|kw| text.starts_with(kw));
    if starts_known {
        text.to_string()
    } else {
        format!("flowchart TD\n{text}")
    }
}

fn decision_node_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z0-9_-]+)\s*\{([^}]*)\}").expect("valid regex"))
}

/// Rule 2: rewrite decision-bracket node definitions (`id{label}`) into plain
/// bracket form (`id["label"]`), a frequent source of parse errors in
/// generated text. Comment lines and `subgraph`/`end` lines pass through
/// verbatim.
fn rewrite_decision_nodes(text: &str) -> String {
    let mut out = Vec::new();
    for line in text.split('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('%') || trimmed.starts_with("subgraph") || trimmed.starts_with("end")
        {
            out.push(line.to_string());
            continue;
        }
        out.push(
            decision_node_regex()
                .replace_all(line, "$1[\"$2\"]")
                .to_string(),
        );
    }
    out.join("\n")
}

fn arrow_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([^\s])(-->|---|->|==>|--x|<-->)([^\s])").expect("valid regex")
    })
}

/// Rule 3: ensure at least one space surrounds every arrow token so that
/// identifiers are not concatenated with arrows.
fn space_around_arrows(text: &str) -> String {
    arrow_regex().replace_all(text, "$1 $2 $3").to_string()
}

fn node_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Za-z0-9_-]+)(\s*\[)").expect("valid regex"))
}

/// Rule 4: sanitize identifiers immediately preceding a bracket, mapping any
/// character outside `[A-Za-z0-9_-]` to `_`.
fn sanitize_node_ids(text: &str) -> String {
    node_id_regex()
        .replace_all(text, |caps: &regex::Captures| {
            let id = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let bracket = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let safe: String = id
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            format!("{safe}{bracket}")
        })
        .to_string()
}

/// Rule 5: append missing `end` lines for any `subgraph` deficit. Surplus
/// `end` lines are left alone; removing text is out of scope for repair.
fn balance_subgraph_ends(text: &str) -> String {
    let mut subgraphs = 0usize;
    let mut ends = 0usize;
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("subgraph") {
            subgraphs += 1;
        } else if trimmed == "end" {
            ends += 1;
        }
    }

    let mut out = text.to_string();
    for _ in ends..subgraphs {
        out.push_str("\nend");
    }
    out
}
