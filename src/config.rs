//! Options for turning a [`DateRecord`](crate::DateRecord) into a timestamp.

use serde::{Deserialize, Serialize};

/// How to treat records that can reach the same day or hour more than one way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coherence {
    /// Every complete path must agree, and every partial group must be
    /// consistent with the result.
    #[default]
    Strict,
    /// Use the first complete path (calendar, then ordinal, then ISO week) and
    /// ignore the rest.
    FirstPath,
}

/// What an absent hour means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTime {
    /// Absent time-of-day components count as zero.
    #[default]
    Midnight,
    /// A record without an hour is insufficient.
    Reject,
}

/// Configuration for [`encode_with`](crate::encode_with).
///
/// # Example
///
/// ```
/// use calendar_codec::{Coherence, EncodeConfig, MissingTime};
///
/// let config = EncodeConfig::new()
///     .with_coherence(Coherence::FirstPath)
///     .with_missing_time(MissingTime::Reject);
///
/// assert_eq!(config.coherence(), Coherence::FirstPath);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    coherence: Coherence,
    missing_time: MissingTime,
}

impl EncodeConfig {
    /// Creates a configuration with strict coherence and midnight defaults.
    pub const fn new() -> Self {
        Self {
            coherence: Coherence::Strict,
            missing_time: MissingTime::Midnight,
        }
    }

    /// Sets how redundant components are reconciled.
    pub const fn with_coherence(mut self, coherence: Coherence) -> Self {
        self.coherence = coherence;
        self
    }

    /// Sets what an absent hour means.
    pub const fn with_missing_time(mut self, missing_time: MissingTime) -> Self {
        self.missing_time = missing_time;
        self
    }

    pub const fn coherence(&self) -> Coherence {
        self.coherence
    }

    pub const fn missing_time(&self) -> MissingTime {
        self.missing_time
    }

    pub(crate) const fn is_strict(&self) -> bool {
        matches!(self.coherence, Coherence::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncodeConfig::default();
        assert_eq!(config, EncodeConfig::new());
        assert_eq!(config.coherence(), Coherence::Strict);
        assert_eq!(config.missing_time(), MissingTime::Midnight);
        assert!(config.is_strict());
    }

    #[test]
    fn test_builder_chaining() {
        let config = EncodeConfig::new()
            .with_missing_time(MissingTime::Reject)
            .with_coherence(Coherence::FirstPath);
        assert_eq!(config.coherence(), Coherence::FirstPath);
        assert_eq!(config.missing_time(), MissingTime::Reject);
        assert!(!config.is_strict());
    }

    #[test]
    fn test_serde() {
        let config = EncodeConfig::new().with_coherence(Coherence::FirstPath);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"coherence":"first_path","missing_time":"midnight"}"#);

        let parsed: EncodeConfig = serde_json::from_str(r#"{"missing_time":"reject"}"#).unwrap();
        assert_eq!(parsed.coherence(), Coherence::Strict);
        assert_eq!(parsed.missing_time(), MissingTime::Reject);
    }
}
