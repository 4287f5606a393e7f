//! Raw query parameters and the filter builder.
//!
//! Two parsing modes exist, matching the two query endpoints:
//!
//! - [`SearchParams`] (precise mode): `start_date`/`end_date` are full
//!   date-times, every text parameter is a case-insensitive substring
//!   filter, and the range applies only when both bounds are present.
//! - [`BrowseParams`] (year-shorthand mode): `start_date`/`end_date`
//!   are bare 4-digit years expanded to calendar-year bounds, and the
//!   per-field rules diverge (exact match for `resourceId`, substring
//!   over the rendered timestamp).
//!
//! The divergence between the modes is deliberate; each mode selects
//! its per-field rule explicitly rather than unifying them.
//! Unrecognized query keys are ignored by deserialization.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::FilterError;
use crate::filter::{FilterSpec, TextFilter, TimeRange};

/// Query parameters for the precise-search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Substring filter on `level`.
    pub level: Option<String>,
    /// Substring filter on `message`.
    pub message: Option<String>,
    /// Substring filter on `resourceId`.
    pub resource_id: Option<String>,
    /// Accepted for interface compatibility; not applied in this mode.
    pub timestamp: Option<String>,
    /// Substring filter on `traceId`.
    #[serde(rename = "traceId")]
    pub trace_id: Option<String>,
    /// Substring filter on `spanId`.
    #[serde(rename = "spanId")]
    pub span_id: Option<String>,
    /// Substring filter on `commit`.
    pub commit: Option<String>,
    /// Substring filter on `metadata.parentResourceId`.
    #[serde(rename = "metadata.parentResourceId")]
    pub parent_resource_id: Option<String>,
    /// Lower range bound, full date-time.
    pub start_date: Option<String>,
    /// Upper range bound, full date-time.
    pub end_date: Option<String>,
    /// Case-insensitive regex over `message`.
    pub regex_search: Option<String>,
}

/// Query parameters for the year-browse endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    /// Substring filter on `level`.
    pub level: Option<String>,
    /// Substring filter on `message`.
    pub message: Option<String>,
    /// Exact (case-insensitive) filter on `resourceId`.
    #[serde(rename = "resourceId")]
    pub resource_id: Option<String>,
    /// Substring filter on the RFC 3339 rendering of `timestamp`.
    pub timestamp: Option<String>,
    /// Substring filter on `traceId`.
    #[serde(rename = "traceId")]
    pub trace_id: Option<String>,
    /// Substring filter on `spanId`.
    #[serde(rename = "spanId")]
    pub span_id: Option<String>,
    /// Substring filter on `commit`.
    pub commit: Option<String>,
    /// Substring filter on `metadata.parentResourceId`.
    #[serde(rename = "metadata.parentResourceId")]
    pub parent_resource_id: Option<String>,
    /// Lower range bound, bare 4-digit year.
    pub start_date: Option<String>,
    /// Upper range bound, bare 4-digit year.
    pub end_date: Option<String>,
    /// Case-insensitive regex over `message`.
    pub regex_search: Option<String>,
}

impl SearchParams {
    /// Builds a [`FilterSpec`] with precise-mode semantics.
    ///
    /// Every text parameter becomes a substring filter, absent ones
    /// degenerating to the empty pattern (which matches everything).
    /// The date range applies only when both bounds are present; a lone
    /// bound is silently dropped. Callers depend on this both-or-neither
    /// policy, so tests pin it as a known quirk.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidDate`] for a malformed date bound
    /// (even a lone one) and [`FilterError::InvalidRegex`] when
    /// `regex_search` does not compile.
    pub fn to_filter(&self) -> Result<FilterSpec, FilterError> {
        let mut spec = FilterSpec::new()
            .with_level(TextFilter::substring(self.level.clone().unwrap_or_default()))
            .with_message(TextFilter::substring(
                self.message.clone().unwrap_or_default(),
            ))
            .with_resource_id(TextFilter::substring(
                self.resource_id.clone().unwrap_or_default(),
            ))
            .with_trace_id(TextFilter::substring(
                self.trace_id.clone().unwrap_or_default(),
            ))
            .with_span_id(TextFilter::substring(
                self.span_id.clone().unwrap_or_default(),
            ))
            .with_commit(TextFilter::substring(
                self.commit.clone().unwrap_or_default(),
            ))
            .with_parent_resource_id(TextFilter::substring(
                self.parent_resource_id.clone().unwrap_or_default(),
            ));

        // The `timestamp` parameter is accepted but never applied on
        // this path. See the field docs on `SearchParams`.

        let start = parse_optional_datetime(&self.start_date)?;
        let end = parse_optional_datetime(&self.end_date)?;
        if let (Some(start), Some(end)) = (start, end) {
            spec = spec.with_time_range(TimeRange::new(Some(start), Some(end)));
        }

        if let Some(pattern) = non_empty(&self.regex_search) {
            spec = spec.with_message_regex(compile_regex(pattern)?);
        }

        Ok(spec)
    }
}

impl BrowseParams {
    /// Builds a [`FilterSpec`] with year-shorthand semantics.
    ///
    /// Only non-empty text parameters install filters. `resourceId`
    /// matches exactly, `timestamp` matches as a substring of the
    /// rendered instant, every other text field matches as a substring.
    /// Year bounds expand to calendar years: both present gives the
    /// span between them, start alone gives that single year, end alone
    /// extends from the minimum representable instant. The upper bound
    /// is the first instant of the following year, kept inclusive so
    /// the literal end of the calendar year is covered.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidYear`] for a bound that is not a
    /// valid 4-digit year and [`FilterError::InvalidRegex`] when
    /// `regex_search` does not compile.
    pub fn to_filter(&self) -> Result<FilterSpec, FilterError> {
        let mut spec = FilterSpec::new();

        if let Some(value) = non_empty(&self.level) {
            spec = spec.with_level(TextFilter::substring(value));
        }
        if let Some(value) = non_empty(&self.message) {
            spec = spec.with_message(TextFilter::substring(value));
        }
        if let Some(value) = non_empty(&self.resource_id) {
            spec = spec.with_resource_id(TextFilter::exact(value));
        }
        if let Some(value) = non_empty(&self.timestamp) {
            spec = spec.with_timestamp_text(TextFilter::substring(value));
        }
        if let Some(value) = non_empty(&self.trace_id) {
            spec = spec.with_trace_id(TextFilter::substring(value));
        }
        if let Some(value) = non_empty(&self.span_id) {
            spec = spec.with_span_id(TextFilter::substring(value));
        }
        if let Some(value) = non_empty(&self.commit) {
            spec = spec.with_commit(TextFilter::substring(value));
        }
        if let Some(value) = non_empty(&self.parent_resource_id) {
            spec = spec.with_parent_resource_id(TextFilter::substring(value));
        }

        let range = match (non_empty(&self.start_date), non_empty(&self.end_date)) {
            (Some(start), Some(end)) => {
                let (start_of_span, _) = year_bounds(start)?;
                let (_, end_of_span) = year_bounds(end)?;
                Some(TimeRange::new(Some(start_of_span), Some(end_of_span)))
            }
            (Some(start), None) => {
                let (start_of_year, end_of_year) = year_bounds(start)?;
                Some(TimeRange::new(Some(start_of_year), Some(end_of_year)))
            }
            (None, Some(end)) => {
                let (_, end_of_year) = year_bounds(end)?;
                Some(TimeRange::new(
                    Some(DateTime::<Utc>::MIN_UTC),
                    Some(end_of_year),
                ))
            }
            (None, None) => None,
        };
        if let Some(range) = range {
            spec = spec.with_time_range(range);
        }

        if let Some(pattern) = non_empty(&self.regex_search) {
            spec = spec.with_message_regex(compile_regex(pattern)?);
        }

        Ok(spec)
    }
}

/// Treats empty strings as absent. Form submissions send empty values
/// for untouched fields, so they must not install filters.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parses a present, non-empty bound as a date-time; absent or empty
/// stays `None`.
fn parse_optional_datetime(value: &Option<String>) -> Result<Option<DateTime<Utc>>, FilterError> {
    non_empty(value).map(parse_datetime).transpose()
}

/// Parses an RFC 3339 date-time, falling back to a naive
/// `YYYY-MM-DDTHH:MM:SS` interpreted as UTC.
fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(FilterError::InvalidDate(raw.to_string()))
}

/// Expands a bare 4-digit year to its inclusive calendar bounds: the
/// first instant of the year and the first instant of the next year
/// (one day past `YYYY-12-31`, keeping the boundary inclusive through
/// the literal end of the year).
fn year_bounds(raw: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), FilterError> {
    let trimmed = raw.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FilterError::InvalidYear(raw.to_string()));
    }
    let year: i32 = trimmed
        .parse()
        .map_err(|_| FilterError::InvalidYear(raw.to_string()))?;

    let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single();
    let end = Utc.with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0).single();
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(FilterError::InvalidYear(raw.to_string())),
    }
}

/// Compiles a case-insensitive regex, reporting the raw pattern on
/// failure.
fn compile_regex(pattern: &str) -> Result<Regex, FilterError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })
}
