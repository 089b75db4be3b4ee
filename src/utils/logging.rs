// ============================================================================
// Logging
// tracing subscriber setup for binaries and examples
// ============================================================================

/// Install a formatting `tracing` subscriber at `level`.
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(level: tracing::Level) -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing(tracing::Level::DEBUG);
        assert!(init_tracing(tracing::Level::DEBUG).is_err());
    }
}
