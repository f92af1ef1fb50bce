//! VST Catalog Core Library
//!
//! Filesystem scanner and identity-resolution engine for VST2 and VST3
//! audio plugins.
//!
//! # Pipeline
//!
//! ## Discovery (`discovery` module)
//! - `discover()` - Walk scan roots and collect candidate artifacts
//! - `default_roots()` - Standard install locations for the platform
//!
//! ## Evidence Extraction (`extract` / `resource` modules)
//! - `extract()` - Descriptor, sidecar and string-table metadata per artifact
//! - Bounded binary reads; malformed sources contribute nothing
//!
//! ## Identity Resolution (`resolve` / `knowledge` modules)
//! - `resolve()` - Ordered fallback chain from curated tables to heuristics
//! - `KnowledgeBase` - Immutable name/pattern/folder/signature tables,
//!   extensible with alias overrides before a scan starts
//!
//! ## Normalization & Dedup (`normalize` / `record` modules)
//! - `canonicalize_manufacturer()` / `canonicalize_name()` - Idempotent cleanup
//! - `normalize_and_merge()` - Collapse duplicate artifacts into one record
//!
//! ## Orchestration & Output (`scanner` / `report` modules)
//! - `Scanner` - Parallel scan pipeline with deterministic output ordering
//! - Text, JSON and CSV report writers plus an unresolved-entries report

pub mod discovery;
pub mod extract;
pub mod knowledge;
pub mod normalize;
pub mod record;
pub mod report;
pub mod resolve;
pub mod resource;
pub mod scanner;

pub use extract::Evidence;
pub use knowledge::KnowledgeBase;
pub use record::{Artifact, PluginRecord, PluginType};
pub use resolve::UNKNOWN_MANUFACTURER;
pub use scanner::{ScanError, ScanOutcome, ScanStats, Scanner};
