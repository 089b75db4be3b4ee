// ============================================================================
// Numeric Module
// Errors and the adapter over the multiprecision engine
// ============================================================================
//
// This module provides:
// - DomainError: Error types for configuration and conversion
// - backend: construction, comparison and exact-rational helpers over BigFloat
// - Rounding: the rounding setting shared by every context operation
//
// Design principles:
// - All fallible operations return Result (no panics)
// - Engine calls stay behind one seam so the domain never touches raw parts

pub mod backend;
mod errors;

pub use backend::Rounding;
pub use errors::{DomainError, DomainResult};

/// Re-exported engine float type.
pub use astro_float::BigFloat;
