//! A single configuration type bundling the three tunables named in the
//! core's external interface: buffer initial capacity, checker mode, and
//! grouper `boxed_ref_tracking`.

use crate::checker::CheckerMode;

/// Default initial capacity for a `MemoryBuffer` created from a `FuryConfig`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Configuration for the three core components, collected into one value so
/// embedders can construct the whole core from a single call site instead
/// of three independent constructors with their own scattered defaults.
///
/// Unlike `ClassChecker::mode` in isolation, no single field here represents
/// a silent security posture on its own, so a plain `Default` plus field
/// assignment is the idiomatic way to build one (no builder is required).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuryConfig {
    /// Initial capacity, in bytes, for buffers this configuration creates.
    pub buffer_initial_capacity: usize,
    /// Mode the class checker is constructed with.
    pub checker_mode: CheckerMode,
    /// Whether the field grouper should use the narrower boxed-read bound
    /// that accounts for reference-tracking overhead.
    pub boxed_ref_tracking: bool,
}

impl Default for FuryConfig {
    fn default() -> Self {
        FuryConfig {
            buffer_initial_capacity: DEFAULT_INITIAL_CAPACITY,
            checker_mode: CheckerMode::Warn,
            boxed_ref_tracking: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_permissive_warn_mode() {
        let config = FuryConfig::default();
        assert_eq!(config.checker_mode, CheckerMode::Warn);
        assert_eq!(config.buffer_initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert!(!config.boxed_ref_tracking);
    }

    #[test]
    fn fields_are_independently_assignable() {
        let config = FuryConfig {
            buffer_initial_capacity: 64,
            checker_mode: CheckerMode::Strict,
            boxed_ref_tracking: true,
        };
        assert_eq!(config.buffer_initial_capacity, 64);
        assert_eq!(config.checker_mode, CheckerMode::Strict);
        assert!(config.boxed_ref_tracking);
    }
}
