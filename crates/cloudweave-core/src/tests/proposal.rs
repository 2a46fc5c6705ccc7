use crate::proposal::strip_code_fences;
use crate::resolver::PLACEHOLDER_MARKER;
use crate::*;
use serde_json::json;

fn raw_proposal() -> DiagramProposal {
    DiagramProposal {
        title: "Check-in system".to_string(),
        description: "A serverless check-in backend".to_string(),
        diagram_source:
            "Here you go:\n```mermaid\nflowchart TD\n    A[Cloud Run] --> B[Cloud SQL]\n```"
                .to_string(),
        infrastructure_code_source:
            "```terraform\nresource \"google_cloud_run_service\" \"api\" {}\n```".to_string(),
        estimated_cost: "$120/month".to_string(),
    }
}

#[test]
fn strip_code_fences_removes_terraform_fences() {
    let stripped = strip_code_fences("```terraform\nresource \"x\" \"y\" {}\n```");
    assert_eq!(stripped, "resource \"x\" \"y\" {}\n");
}

#[test]
fn strip_code_fences_handles_bare_fences() {
    assert_eq!(strip_code_fences("```\ncode\n```"), "\ncode\n");
    assert_eq!(strip_code_fences("no fences"), "no fences");
}

#[test]
fn strip_code_fences_is_case_insensitive() {
    let stripped = strip_code_fences("```Terraform\nx\n```");
    assert_eq!(stripped, "x\n");
}

#[test]
fn prepare_extracts_the_diagram_and_strips_the_code() {
    let prepared = prepare_proposal(raw_proposal());

    assert!(prepared.diagram_source.starts_with("flowchart TD"));
    assert!(prepared.diagram_source.contains(&format!(
        "cloudrun\n{PLACEHOLDER_MARKER}\n{PLACEHOLDER_MARKER}"
    )));
    assert!(!prepared.diagram_source.contains("```"));
    assert!(!prepared.infrastructure_code_source.contains("```"));

    // Untouched fields survive.
    assert_eq!(prepared.title, "Check-in system");
    assert_eq!(prepared.estimated_cost, "$120/month");
}

#[test]
fn prepare_preserves_batch_order() {
    let mut second = raw_proposal();
    second.title = "Second".to_string();
    let prepared = prepare_proposals(vec![raw_proposal(), second]);

    assert_eq!(prepared.len(), 2);
    assert_eq!(prepared[0].title, "Check-in system");
    assert_eq!(prepared[1].title, "Second");
}

#[test]
fn proposal_deserializes_from_the_response_schema() {
    let value = json!({
        "title": "Game backend",
        "description": "Realtime game state",
        "diagram": "flowchart TD\n    A --> B",
        "terraform": "resource \"x\" \"y\" {}",
        "runningCost": "$450/month"
    });
    let proposal: DiagramProposal = serde_json::from_value(value).unwrap();
    assert_eq!(proposal.title, "Game backend");
    assert_eq!(proposal.diagram_source, "flowchart TD\n    A --> B");
    assert_eq!(proposal.infrastructure_code_source, "resource \"x\" \"y\" {}");
    assert_eq!(proposal.estimated_cost, "$450/month");
}

#[test]
fn proposal_serializes_back_to_the_response_schema() {
    let proposal = DiagramProposal {
        title: "t".to_string(),
        description: "d".to_string(),
        diagram_source: "flowchart TD".to_string(),
        infrastructure_code_source: "resource".to_string(),
        estimated_cost: "$1".to_string(),
    };
    let value = serde_json::to_value(&proposal).unwrap();
    assert_eq!(value["diagram"], "flowchart TD");
    assert_eq!(value["terraform"], "resource");
    assert_eq!(value["runningCost"], "$1");
}
