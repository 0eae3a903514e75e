use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Healthy interval for a biomarker, expressed in its standard unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn half_span(&self) -> f64 {
        (self.high - self.low) / 2.0
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Status implied by the numeric value alone; never replaces the supplied status.
    pub fn implied_status(&self, value: f64) -> ResultStatus {
        if value < self.low {
            ResultStatus::Low
        } else if value > self.high {
            ResultStatus::High
        } else {
            ResultStatus::Normal
        }
    }
}

/// Static definition of a measurable marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biomarker {
    pub id: String,
    pub name: String,
    pub standard_unit: String,
    pub reference_range: ReferenceRange,
    pub category: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Low,
    Normal,
    High,
}

impl ResultStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Normal, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    /// Severity ordering used for sorting: low < normal < high.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::High => 2,
        }
    }

    pub fn is_normal(self) -> bool {
        self == Self::Normal
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(format!("unknown result status '{other}'")),
        }
    }
}

/// One measurement event as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub id: String,
    pub biomarker_id: String,
    pub value: f64,
    pub sampled_at: String,
    pub status: ResultStatus,
}

/// A result joined with its biomarker definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedResult {
    #[serde(flatten)]
    pub result: LabResult,
    pub biomarker: Biomarker,
}

impl EnrichedResult {
    pub fn id(&self) -> &str {
        &self.result.id
    }

    pub fn biomarker_id(&self) -> &str {
        &self.result.biomarker_id
    }

    pub fn value(&self) -> f64 {
        self.result.value
    }

    pub fn status(&self) -> ResultStatus {
        self.result.status
    }

    pub fn sampled_at(&self) -> &str {
        &self.result.sampled_at
    }

    pub fn is_out_of_range(&self) -> bool {
        !self.result.status.is_normal()
    }
}

/// Joins results to their biomarker definitions, dropping results whose biomarker is unknown.
pub fn join(biomarkers: &[Biomarker], results: &[LabResult]) -> Vec<EnrichedResult> {
    let by_id: HashMap<&str, &Biomarker> = biomarkers
        .iter()
        .map(|biomarker| (biomarker.id.as_str(), biomarker))
        .collect();

    results
        .iter()
        .filter_map(|result| {
            by_id
                .get(result.biomarker_id.as_str())
                .map(|biomarker| EnrichedResult {
                    result: result.clone(),
                    biomarker: (*biomarker).clone(),
                })
        })
        .collect()
}

/// Parses an ISO-8601 sample timestamp (RFC 3339 or a bare `YYYY-MM-DD` date).
pub fn parse_sampled_at(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// Chronological comparison of two sample timestamps.
///
/// Unparseable timestamps order before every parseable one and lexically among themselves,
/// which keeps the ordering total.
pub fn compare_sampled_at(a: &str, b: &str) -> Ordering {
    match (parse_sampled_at(a), parse_sampled_at(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
