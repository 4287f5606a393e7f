//! Filter specification and predicate evaluation.
//!
//! This module provides:
//! - [`TextMatch`] — Per-field matching rule (substring or exact)
//! - [`TextFilter`] — A pattern paired with its matching rule
//! - [`TimeRange`] — Inclusive timestamp range
//! - [`FilterSpec`] — Normalized filter criteria for one query
//!
//! A [`FilterSpec`] is built once per request (see [`crate::query`]),
//! is immutable afterwards, and decides match/no-match for candidate
//! records with logical AND across every present sub-filter.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::types::LogRecord;

/// Matching rule for a text field.
///
/// Both rules fold case. The two query modes deliberately disagree on
/// which rule applies to which field; the rule is carried per filter so
/// the asymmetry stays visible instead of being unified away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Case-insensitive containment. The empty pattern matches everything.
    Substring,
    /// Case-insensitive equality.
    Exact,
}

/// A text pattern paired with its matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    /// The raw pattern as supplied by the caller.
    pub pattern: String,
    /// How the pattern is applied.
    pub rule: TextMatch,
}

impl TextFilter {
    /// Creates a case-insensitive substring filter.
    #[must_use]
    pub fn substring(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            rule: TextMatch::Substring,
        }
    }

    /// Creates a case-insensitive exact-equality filter.
    #[must_use]
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            rule: TextMatch::Exact,
        }
    }

    /// Applies the filter to a field value.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        let pattern = self.pattern.to_lowercase();
        let value = value.to_lowercase();
        match self.rule {
            TextMatch::Substring => value.contains(&pattern),
            TextMatch::Exact => value == pattern,
        }
    }
}

/// Inclusive timestamp range.
///
/// Both bounds are included in the match set; an absent bound leaves
/// that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Lower bound (inclusive).
    pub start: Option<DateTime<Utc>>,
    /// Upper bound (inclusive).
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Creates a range with the given bounds.
    #[must_use]
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Returns true if the range constrains nothing.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Checks whether a timestamp falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if timestamp > end {
                return false;
            }
        }
        true
    }
}

/// Normalized, validated filter criteria for one query.
///
/// Constructed fresh per request, immutable once built, discarded after
/// the query executes. Every field that is `None` is a no-op; a record
/// matches iff it satisfies **all** present sub-filters.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Filter on `level`.
    pub level: Option<TextFilter>,
    /// Filter on `message`.
    pub message: Option<TextFilter>,
    /// Filter on `resourceId`.
    pub resource_id: Option<TextFilter>,
    /// Filter on `traceId`.
    pub trace_id: Option<TextFilter>,
    /// Filter on `spanId`.
    pub span_id: Option<TextFilter>,
    /// Filter on `commit`.
    pub commit: Option<TextFilter>,
    /// Filter on `metadata.parentResourceId`. Records without metadata
    /// are evaluated against the empty string.
    pub parent_resource_id: Option<TextFilter>,
    /// Filter on the RFC 3339 rendering of `timestamp` (year-browse
    /// mode only).
    pub timestamp_text: Option<TextFilter>,
    /// Case-insensitive regex over `message`. Compiled at build time;
    /// an invalid pattern never reaches evaluation.
    pub message_regex: Option<Regex>,
    /// Inclusive timestamp range.
    pub time_range: TimeRange,
}

impl FilterSpec {
    /// Creates an empty specification that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `level` filter.
    #[must_use]
    pub fn with_level(mut self, filter: TextFilter) -> Self {
        self.level = Some(filter);
        self
    }

    /// Sets the `message` filter.
    #[must_use]
    pub fn with_message(mut self, filter: TextFilter) -> Self {
        self.message = Some(filter);
        self
    }

    /// Sets the `resourceId` filter.
    #[must_use]
    pub fn with_resource_id(mut self, filter: TextFilter) -> Self {
        self.resource_id = Some(filter);
        self
    }

    /// Sets the `traceId` filter.
    #[must_use]
    pub fn with_trace_id(mut self, filter: TextFilter) -> Self {
        self.trace_id = Some(filter);
        self
    }

    /// Sets the `spanId` filter.
    #[must_use]
    pub fn with_span_id(mut self, filter: TextFilter) -> Self {
        self.span_id = Some(filter);
        self
    }

    /// Sets the `commit` filter.
    #[must_use]
    pub fn with_commit(mut self, filter: TextFilter) -> Self {
        self.commit = Some(filter);
        self
    }

    /// Sets the `metadata.parentResourceId` filter.
    #[must_use]
    pub fn with_parent_resource_id(mut self, filter: TextFilter) -> Self {
        self.parent_resource_id = Some(filter);
        self
    }

    /// Sets the timestamp-text filter.
    #[must_use]
    pub fn with_timestamp_text(mut self, filter: TextFilter) -> Self {
        self.timestamp_text = Some(filter);
        self
    }

    /// Sets the message regex filter.
    #[must_use]
    pub fn with_message_regex(mut self, regex: Regex) -> Self {
        self.message_regex = Some(regex);
        self
    }

    /// Sets the timestamp range filter.
    #[must_use]
    pub const fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    /// Decides whether a record satisfies every present sub-filter.
    ///
    /// Never panics: a record without metadata is evaluated against the
    /// empty string for the parent-resource filter.
    #[must_use]
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(filter) = &self.level {
            if !filter.matches(&record.level) {
                return false;
            }
        }
        if let Some(filter) = &self.message {
            if !filter.matches(&record.message) {
                return false;
            }
        }
        if let Some(filter) = &self.resource_id {
            if !filter.matches(&record.resource_id) {
                return false;
            }
        }
        if let Some(filter) = &self.trace_id {
            if !filter.matches(&record.trace_id) {
                return false;
            }
        }
        if let Some(filter) = &self.span_id {
            if !filter.matches(&record.span_id) {
                return false;
            }
        }
        if let Some(filter) = &self.commit {
            if !filter.matches(&record.commit) {
                return false;
            }
        }
        if let Some(filter) = &self.parent_resource_id {
            if !filter.matches(record.parent_resource_id()) {
                return false;
            }
        }
        if let Some(filter) = &self.timestamp_text {
            let rendered = record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, true);
            if !filter.matches(&rendered) {
                return false;
            }
        }
        if let Some(regex) = &self.message_regex {
            if !regex.is_match(&record.message) {
                return false;
            }
        }
        self.time_range.contains(record.timestamp)
    }
}
