//! Boundary types for the generation collaborator, plus the response
//! preparation pass that turns raw generated proposals into pipeline-ready
//! ones.

use crate::Result;
use crate::catalog::CloudProvider;
use crate::normalize::extract_diagram_source;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One proposed architecture, as returned by the generation collaborator.
///
/// Field renames mirror the collaborator's JSON response schema. Immutable
/// once created; passed by value into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramProposal {
    pub title: String,
    pub description: String,
    #[serde(rename = "diagram")]
    pub diagram_source: String,
    #[serde(rename = "terraform")]
    pub infrastructure_code_source: String,
    #[serde(rename = "runningCost")]
    pub estimated_cost: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProposalRequest {
    pub requirements: String,
    pub provider: CloudProvider,
    /// Monthly budget in USD, when the user supplied one.
    pub budget: Option<f64>,
    pub include_ops_telemetry: bool,
}

/// The generative-model exchange. Network and response-shape failures are the
/// implementation's problem; a malformed `diagram_source` inside a successful
/// response is the pipeline's (handled by the render orchestrator).
pub trait ProposalGenerator {
    fn generate(&self, request: &ProposalRequest)
    -> impl Future<Output = Result<Vec<DiagramProposal>>>;
}

fn code_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)```(terraform\n?)?").expect("valid regex"))
}

/// Strips code-fence markers from generated infrastructure code.
pub fn strip_code_fences(code: &str) -> String {
    code_fence_regex().replace_all(code, "").to_string()
}

/// Prepares one raw proposal for the pipeline: extracts and label-annotates
/// the diagram source, and strips fences from the infrastructure code.
pub fn prepare_proposal(proposal: DiagramProposal) -> DiagramProposal {
    DiagramProposal {
        diagram_source: extract_diagram_source(&proposal.diagram_source),
        infrastructure_code_source: strip_code_fences(&proposal.infrastructure_code_source),
        ..proposal
    }
}

/// Prepares a whole response batch, preserving the collaborator's ranking
/// order.
pub fn prepare_proposals(proposals: Vec<DiagramProposal>) -> Vec<DiagramProposal> {
    proposals.into_iter().map(prepare_proposal).collect()
}
