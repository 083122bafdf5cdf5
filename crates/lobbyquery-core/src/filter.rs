//! Tagged filter values sent to the directory API.
//!
//! A filter is either a plain string or a regex pattern, optionally
//! negated. Multi-valued fields (platform, season) carry a list of
//! alternatives instead of a single string. Regex validity is checked
//! lazily, at the point the pattern is actually used for matching; an
//! invalid pattern simply matches nothing.

use serde::{Deserialize, Serialize};

/// A single-valued filter: plain text or a regex pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    /// Filter text (or pattern when `is_regex`)
    #[serde(rename = "Value")]
    pub value: String,
    /// Interpret `value` as a regex pattern
    #[serde(rename = "IsRegex", skip_serializing_if = "std::ops::Not::not", default)]
    pub is_regex: bool,
    /// Negate the filter (exclude matches)
    #[serde(rename = "IsExclude", skip_serializing_if = "std::ops::Not::not", default)]
    pub is_exclude: bool,
}

impl FilterValue {
    /// Plain (non-regex) filter value.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_regex: false,
            is_exclude: false,
        }
    }

    /// Regex filter value. The pattern is not validated here.
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            value: pattern.into(),
            is_regex: true,
            is_exclude: false,
        }
    }

    /// Reinterpret a plain value as a regex without changing its text.
    ///
    /// No-op if the value is already a regex.
    pub fn make_regex(&mut self) {
        self.is_regex = true;
    }

    /// Convert a plain value into an exact-match anchor: `^<escaped>$`.
    ///
    /// No-op if the value is already a regex (including a previous
    /// exact conversion).
    pub fn make_exact(&mut self) {
        if self.is_regex {
            return;
        }
        self.value = format!("^{}$", regex::escape(&self.value));
        self.is_regex = true;
    }

    /// Test a candidate string against this filter.
    ///
    /// Plain values match by substring; regex values by pattern match.
    /// An invalid pattern matches nothing (lazy validation). The
    /// `is_exclude` flag is not applied here — exclusion is a wire-side
    /// concern interpreted by the directory service.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        if self.is_regex {
            regex::Regex::new(&self.value).is_ok_and(|re| re.is_match(candidate))
        } else {
            candidate.contains(&self.value)
        }
    }
}

/// A multi-valued filter: any-of alternatives, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterList {
    /// Alternative values
    #[serde(rename = "Value")]
    pub values: Vec<String>,
    /// Negate the filter (exclude matches)
    #[serde(rename = "IsExclude", skip_serializing_if = "std::ops::Not::not", default)]
    pub is_exclude: bool,
}

impl FilterList {
    /// Filter list from a `|`-separated user token.
    #[must_use]
    pub fn from_alternatives(text: &str) -> Self {
        Self {
            values: text
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            is_exclude: false,
        }
    }
}
