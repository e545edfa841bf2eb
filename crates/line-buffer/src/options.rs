//! Buffer configuration.
//!
//! Options are plain data so hosts can embed them in their own configuration files:
//!
//! ```rust
//! use line_buffer::{BufferOptions, VerifyLevel, ViolationPolicy};
//!
//! let options: BufferOptions =
//!     serde_json::from_str(r#"{ "verify": "full", "onViolation": "rebuild" }"#).unwrap();
//! assert_eq!(options.verify, VerifyLevel::Full);
//! assert_eq!(options.on_violation, ViolationPolicy::Rebuild);
//! ```

use serde::{Deserialize, Serialize};

/// How much checking [`crate::LineBuffer::apply_edit`] does after patching the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerifyLevel {
    /// No checks.
    Off,
    /// Compare the index total with the tracked document length. O(1).
    #[default]
    Totals,
    /// Recompute every line weight and compare. O(N); meant for tests and debugging.
    Full,
}

/// What to do when a check finds the index out of sync with the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationPolicy {
    /// Abort with a panic.
    Panic,
    /// Log the violation and rebuild the index from the lines.
    Rebuild,
}

impl Default for ViolationPolicy {
    /// `Panic` in debug builds, `Rebuild` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Rebuild
        }
    }
}

/// Options for a [`crate::LineBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BufferOptions {
    /// Post-edit consistency checks.
    pub verify: VerifyLevel,
    /// Reaction to a failed check.
    pub on_violation: ViolationPolicy,
}

impl BufferOptions {
    /// Set the verification level.
    pub fn with_verify(mut self, verify: VerifyLevel) -> Self {
        self.verify = verify;
        self
    }

    /// Set the violation policy.
    pub fn with_violation_policy(mut self, policy: ViolationPolicy) -> Self {
        self.on_violation = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let options: BufferOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, BufferOptions::default());
        assert_eq!(options.verify, VerifyLevel::Totals);
    }

    #[test]
    fn test_serialize_camel_case() {
        let options = BufferOptions::default()
            .with_verify(VerifyLevel::Off)
            .with_violation_policy(ViolationPolicy::Rebuild);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"verify":"off","onViolation":"rebuild"}"#);
    }
}
