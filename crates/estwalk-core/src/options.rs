// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parser-wide options consumed by the [`NodeFactory`](crate::NodeFactory).
//!
//! The keys mirror the options object of JavaScript ESTree parsers, so an
//! options file written for one of them deserializes directly:
//!
//! ```
//! use estwalk_core::{DeprecationPolicy, ParseOptions};
//!
//! let options: ParseOptions =
//!     serde_json::from_str(r#"{"locations": true, "directSourceFile": "a.js"}"#).unwrap();
//! assert!(options.locations);
//! assert!(!options.ranges);
//! assert_eq!(options.deprecation, DeprecationPolicy::WarnOnce);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable read by [`DeprecationPolicy::from_env`].
pub const DEPRECATION_ENV: &str = "ESTWALK_DEPRECATION";

/// What happens when a deprecated calling convention is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecationPolicy {
    /// Accept silently.
    Silent,
    /// Accept, logging one warning per factory.
    #[default]
    #[serde(rename = "warn")]
    WarnOnce,
    /// Accept, logging one warning per factory with a backtrace attached.
    Trace,
    /// Reject with [`NodeError::Deprecated`](crate::NodeError::Deprecated).
    Strict,
}

impl DeprecationPolicy {
    /// Reads the policy from `ESTWALK_DEPRECATION`, falling back to the
    /// default when the variable is unset or unrecognized.
    pub fn from_env() -> Self {
        match std::env::var(DEPRECATION_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|err: UnknownPolicy| {
                tracing::warn!(error = %err, "ignoring {DEPRECATION_ENV}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

/// A policy name that is not one of `silent`, `warn`, `trace` or `strict`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown deprecation policy '{value}', expected silent, warn, trace or strict")]
pub struct UnknownPolicy {
    pub value: String,
}

impl FromStr for DeprecationPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(Self::Silent),
            "warn" => Ok(Self::WarnOnce),
            "trace" => Ok(Self::Trace),
            "strict" => Ok(Self::Strict),
            other => Err(UnknownPolicy {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeprecationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Silent => "silent",
            Self::WarnOnce => "warn",
            Self::Trace => "trace",
            Self::Strict => "strict",
        };
        f.write_str(name)
    }
}

/// Options that decide which optional metadata nodes carry.
///
/// | Option | Effect |
/// |--------|--------|
/// | `locations` | attach `loc` at start, close `loc.end` at finish |
/// | `ranges` | attach `range`, close `range[1]` at finish |
/// | `direct_source_file` | stamp `sourceFile` on every node |
/// | `source_file` | stamp `loc.source` (needs `locations`) |
/// | `deprecation` | handling of the legacy position pair |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    pub locations: bool,
    pub ranges: bool,
    pub direct_source_file: Option<String>,
    pub source_file: Option<String>,
    pub deprecation: DeprecationPolicy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locations(mut self, enabled: bool) -> Self {
        self.locations = enabled;
        self
    }

    #[must_use]
    pub fn with_ranges(mut self, enabled: bool) -> Self {
        self.ranges = enabled;
        self
    }

    #[must_use]
    pub fn with_direct_source_file(mut self, name: impl Into<String>) -> Self {
        self.direct_source_file = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, name: impl Into<String>) -> Self {
        self.source_file = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_deprecation(mut self, policy: DeprecationPolicy) -> Self {
        self.deprecation = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(!options.locations);
        assert!(!options.ranges);
        assert_eq!(options.direct_source_file, None);
        assert_eq!(options.deprecation, DeprecationPolicy::WarnOnce);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .with_locations(true)
            .with_ranges(true)
            .with_source_file("lib.js")
            .with_deprecation(DeprecationPolicy::Strict);
        assert!(options.locations && options.ranges);
        assert_eq!(options.source_file.as_deref(), Some("lib.js"));
        assert_eq!(options.deprecation, DeprecationPolicy::Strict);
    }

    #[test]
    fn test_policy_parse_and_display() {
        for policy in [
            DeprecationPolicy::Silent,
            DeprecationPolicy::WarnOnce,
            DeprecationPolicy::Trace,
            DeprecationPolicy::Strict,
        ] {
            assert_eq!(policy.to_string().parse::<DeprecationPolicy>(), Ok(policy));
        }
        assert_eq!(
            " STRICT ".parse::<DeprecationPolicy>(),
            Ok(DeprecationPolicy::Strict)
        );
        let err = "Loud".parse::<DeprecationPolicy>().unwrap_err();
        assert_eq!(
            err,
            UnknownPolicy {
                value: "loud".to_string()
            }
        );
        assert!(err.to_string().contains("expected silent, warn, trace or strict"));
    }

    #[test]
    fn test_policy_from_env() {
        std::env::set_var(DEPRECATION_ENV, "trace");
        assert_eq!(DeprecationPolicy::from_env(), DeprecationPolicy::Trace);
        std::env::set_var(DEPRECATION_ENV, "sometimes");
        assert_eq!(DeprecationPolicy::from_env(), DeprecationPolicy::WarnOnce);
        std::env::remove_var(DEPRECATION_ENV);
        assert_eq!(DeprecationPolicy::from_env(), DeprecationPolicy::WarnOnce);
    }

    #[test]
    fn test_options_json_keys() {
        let options: ParseOptions = serde_json::from_str(
            r#"{"ranges": true, "sourceFile": "x.js", "deprecation": "strict"}"#,
        )
        .unwrap();
        assert!(options.ranges);
        assert_eq!(options.source_file.as_deref(), Some("x.js"));
        assert_eq!(options.deprecation, DeprecationPolicy::Strict);
    }
}
