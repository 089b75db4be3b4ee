// ============================================================================
// Utilities Module
// Helpers around the library proper
// ============================================================================

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "logging")]
pub use logging::init_tracing;
