#![forbid(unsafe_code)]

//! `cloudweave` turns noisy model-generated architecture text into cloud
//! diagrams: it extracts and repairs the embedded graph description, maps
//! free-form service names to provider icon + label compound elements, and
//! drives rendering through a cached, multi-stage fallback chain.
//!
//! This crate re-exports the full pipeline from `cloudweave-core` and adds
//! [`samples`], a set of bundled proposals useful for demos and offline
//! development.

pub use cloudweave_core::*;

pub mod samples;
