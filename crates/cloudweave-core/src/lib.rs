#![forbid(unsafe_code)]

//! Cloud architecture diagram synthesis pipeline (headless).
//!
//! Turns noisy model-generated text into diagram-engine primitives:
//! - extract and repair the embedded graph-description source
//!   ([`normalize`]),
//! - resolve free-form cloud service names to provider-specific icon + label
//!   compound elements ([`resolver`], [`catalog`], [`builder`]),
//! - drive synthesis through a cached, multi-stage fallback state machine
//!   ([`orchestrate`], [`cache`]).
//!
//! Design goals:
//! - deterministic, testable outputs (the fallback chain is a pure state
//!   machine; repair rules are pure text transforms)
//! - runtime-agnostic async APIs (no specific executor required)

pub mod builder;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod normalize;
pub mod orchestrate;
pub mod primitive;
pub mod proposal;
pub mod resolver;

pub use builder::{AssetFetcher, CompoundOutput, build_compound_elements};
pub use cache::{CacheKey, DiagramCache};
pub use catalog::CloudProvider;
pub use error::{Error, Result};
pub use normalize::{NormalizedSource, extract_diagram_source, repair_source};
pub use orchestrate::{
    DiagramEngine, DiagramParser, DiagramView, ParseOptions, RenderAdvisory, RenderEffect,
    RenderEvent, RenderMachine, RenderOrchestrator, RenderOutcome, RenderState, SettledOutcome,
};
pub use primitive::{BinaryAsset, DiagramPrimitive, ParsedPrimitives};
pub use proposal::{
    DiagramProposal, ProposalGenerator, ProposalRequest, prepare_proposal, prepare_proposals,
};
pub use resolver::resolve_service_labels;

#[cfg(test)]
mod tests;
