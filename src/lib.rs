//! Senwell Score - deterministic wellness scoring engine for senior health profiles
//!
//! The engine transforms a health profile into a 0-100 wellness score through a
//! pure, synchronous pipeline: age bracketing → per-metric normalization →
//! gender-conditioned weighted aggregation → recommendation generation. It
//! holds no mutable state and reads no clock, so concurrent callers need no
//! synchronization and identical inputs always produce identical output.
//!
//! ## Modules
//!
//! - **schema**: wellness.profile.v1 raw input records and canonicalization
//! - **pipeline**: `calculate_fitness_score` and the `ScoreEngine` wrapper
//! - **report**: wellness.assessment.v1 output envelope

pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod recommend;
pub mod reference;
pub mod report;
pub mod schema;
pub mod scorer;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::ScoreError;
pub use pipeline::{calculate_fitness_score, ScoreEngine};
pub use report::{AssessmentReport, ReportEncoder, REPORT_VERSION};

// Schema exports
pub use schema::{ProfileAdapter, RawProfile, SCHEMA_VERSION};

// Core data model exports
pub use types::{FitnessAssessment, HealthProfile};

/// Engine version embedded in all assessment reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for assessment reports
pub const PRODUCER_NAME: &str = "senwell-score";
