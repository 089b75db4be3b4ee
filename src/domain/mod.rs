// ============================================================================
// Domain Module
// Precision context, its configuration and the values it converts
// ============================================================================

pub mod config;
pub mod context;
pub mod value;

pub use config::{ContextConfig, ToleranceSetting, DEFAULT_PRECISION_BITS};
pub use context::{ContextId, PrecisionContext};
pub use value::Value;
