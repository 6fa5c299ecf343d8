//! wellness.profile.v1 input schema
//!
//! This module defines the raw profile record callers submit (form handlers,
//! batch recompute jobs) and the adapter that validates it and converts it to
//! the canonical metric profile the engine consumes.

mod adapter;
mod profile;

pub use adapter::*;
pub use profile::*;
