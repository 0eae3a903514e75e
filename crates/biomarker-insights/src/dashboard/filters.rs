use super::domain::{compare_sampled_at, EnrichedResult, ResultStatus};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const ALL: &str = "all";
const ATTENTION: &str = "attention";

/// String-backed serde through `Display`/`FromStr`, so query strings, JSON bodies and CLI flags
/// share one parser.
macro_rules! serde_via_str {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Value,
    Status,
    SampledAt,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "value" => Ok(Self::Value),
            "status" => Ok(Self::Status),
            "sampledat" | "sampled_at" | "date" => Ok(Self::SampledAt),
            _ => Err(format!(
                "unknown sort field '{}' (expected name, value, status or sampledAt)",
                value.trim()
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Value => "value",
            Self::Status => "status",
            Self::SampledAt => "sampledAt",
        })
    }
}

serde_via_str!(SortField);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!(
                "unknown sort direction '{}' (expected asc or desc)",
                value.trim()
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

serde_via_str!(SortDirection);

/// Status predicate; `All` disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ResultStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ResultStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

serde_via_str!(StatusFilter);

/// Category selection, including the `attention` pseudo-category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Attention,
    Named(String),
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("category must not be empty".to_string());
        }
        if trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else if trimmed.eq_ignore_ascii_case(ATTENTION) {
            Ok(Self::Attention)
        } else {
            Ok(Self::Named(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Attention => f.write_str(ATTENTION),
            Self::Named(name) => f.write_str(name),
        }
    }
}

serde_via_str!(CategoryFilter);

/// Full list-view selection as received from the toolbar or query string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultQuery {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl ResultQuery {
    pub fn is_attention_mode(&self) -> bool {
        self.category == CategoryFilter::Attention
    }

    /// Status filter actually in force; attention mode overrides manual selection.
    pub fn effective_status(&self) -> StatusFilter {
        if self.is_attention_mode() {
            StatusFilter::All
        } else {
            self.status
        }
    }

    pub fn apply(&self, results: &[EnrichedResult]) -> Vec<EnrichedResult> {
        match &self.category {
            CategoryFilter::Attention => {
                let flagged: Vec<EnrichedResult> = results
                    .iter()
                    .filter(|result| result.is_out_of_range())
                    .cloned()
                    .collect();
                filter_and_sort(&flagged, None, StatusFilter::All, self.sort, self.direction)
            }
            CategoryFilter::All => {
                filter_and_sort(results, None, self.status, self.sort, self.direction)
            }
            CategoryFilter::Named(name) => {
                filter_and_sort(
                    results,
                    Some(name.as_str()),
                    self.status,
                    self.sort,
                    self.direction,
                )
            }
        }
    }
}

/// Filters by exact category and status, then stable-sorts by the chosen key.
///
/// `category: None` disables the category filter.
pub fn filter_and_sort(
    results: &[EnrichedResult],
    category: Option<&str>,
    status: StatusFilter,
    sort: SortField,
    direction: SortDirection,
) -> Vec<EnrichedResult> {
    let mut filtered: Vec<EnrichedResult> = results
        .iter()
        .filter(|result| category.map_or(true, |name| result.biomarker.category == name))
        .filter(|result| status.matches(result.status()))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| direction.apply(compare_by(sort, a, b)));
    filtered
}

fn compare_by(field: SortField, a: &EnrichedResult, b: &EnrichedResult) -> Ordering {
    match field {
        SortField::Name => compare_names(&a.biomarker.name, &b.biomarker.name),
        SortField::Value => a.value().total_cmp(&b.value()),
        SortField::Status => a.status().rank().cmp(&b.status().rank()),
        SortField::SampledAt => compare_sampled_at(a.sampled_at(), b.sampled_at()),
    }
}

/// Case- and accent-insensitive collation.
///
/// Names equal at that level put unaccented before accented, then lowercase before uppercase.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded_case(a).cmp(folded_case(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    folded_case(name).filter(|c| !is_combining_mark(*c))
}

fn folded_case(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}
