//! Maps free-form cloud service names in diagram source text to canonical
//! service keys, reserving layout space for the icon and label that replace
//! them later in the pipeline.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Sentinel reserving one line of vertical space in a node label. Long enough
/// to never collide with legitimate generated content.
pub const PLACEHOLDER_MARKER: &str = "XXXXXXXXXXXXXXXXXX";

/// Human-readable service names and their canonical keys.
///
/// The table is ordered longest-name-first (ties broken lexicographically) so
/// that a shorter name is never matched inside a longer one with a different
/// canonical meaning, e.g. "Cloud Datastore" before "Datastore".
fn label_table() -> &'static IndexMap<&'static str, &'static str> {
    static TABLE: OnceLock<IndexMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut names: Vec<(&str, &str)> = vec![
            ("BigQuery", "bigq"),
            ("API Gateway", "cloudgat"),
            ("Datastore", "datastore"),
            ("Cloud CDN", "cloudcdn"),
            ("Cloud Datastore", "datastore"),
            ("Cloud API Gateway", "cloudgat"),
            ("Cloud DNS", "clouddns"),
            ("Cloud Load Balancing", "loadbalanc"),
            ("Load Balancing", "loadbalanc"),
            ("Load Balancer", "loadbalanc"),
            ("App Engine", "appen"),
            ("Cloud Pub/Sub", "pubsub"),
            ("Cloud Scheduler", "cloudsh"),
            ("Cloud SQL", "cloudsql"),
            ("Cloud Storage", "cloudstor"),
            ("Cloud Run", "cloudrun"),
            ("Cloud Functions", "cloudfun"),
            ("Cloud Logging", "cloudlog"),
            ("Cloud Monitoring", "cloudmon"),
            ("Cloud Spanner", "cloudspan"),
            ("Compute Engine", "computen"),
            ("Google Kubernetes Engine", "gke"),
            ("Kubernetes Engine", "gke"),
            ("GKE Cluster", "gke"),
            ("GKE", "gke"),
            ("Identity Platform", "idplat"),
            ("Firestore", "firest"),
            ("Memorystore", "memorystore"),
        ];
        names.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.into_iter().collect()
    })
}

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = label_table()
            .keys()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i){alternation}")).expect("valid regex")
    })
}

/// The known human-readable names, in match-priority order.
pub fn known_service_names() -> impl Iterator<Item = &'static str> {
    label_table().keys().copied()
}

/// Canonical key for a single human-readable name, case-insensitive.
pub fn canonical_key_for(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    label_table()
        .iter()
        .find(|(n, _)| n.to_lowercase() == lowered)
        .map(|(_, key)| *key)
}

/// Replaces every case-insensitive occurrence of a known service name with
/// `<key>\n<MARKER>\n<MARKER>`, reserving two label lines for the icon+label
/// pair synthesized later by the compound-element pass.
///
/// Pure text transform; the match is done in a single pass so replacement
/// output is never re-scanned (the canonical key `gke` would otherwise match
/// the name "GKE" again).
pub fn resolve_service_labels(text: &str) -> String {
    label_regex()
        .replace_all(text, |caps: &regex::Captures| {
            let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            match canonical_key_for(matched) {
                Some(key) => format!("{key}\n{PLACEHOLDER_MARKER}\n{PLACEHOLDER_MARKER}"),
                None => matched.to_string(),
            }
        })
        .to_string()
}
