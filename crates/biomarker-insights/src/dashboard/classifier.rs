use super::domain::{EnrichedResult, ReferenceRange, ResultStatus};
use super::scoring::ScoringConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Mild,
    Severe,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Mild => "Mild",
            Self::Severe => "Severe",
        }
    }

    /// Presentation tone keyed by severity.
    pub const fn tone(self) -> &'static str {
        match self {
            Self::Normal => "emerald",
            Self::Mild => "amber",
            Self::Severe => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
    Dot,
    ArrowUp,
    ArrowDown,
}

/// Display descriptor handed to list rows, badges and the priority panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultDisplay {
    pub severity: Severity,
    pub label: &'static str,
    pub icon: StatusIcon,
    pub tone: &'static str,
    pub deviation: f64,
}

/// Distance from the range midpoint in half-span units.
///
/// A zero-span range reports `0` when the value sits on the midpoint and
/// `config.degenerate_range_deviation` otherwise.
pub fn range_deviation(value: f64, range: &ReferenceRange, config: &ScoringConfig) -> f64 {
    let mid = range.midpoint();
    let half_span = range.half_span();

    if half_span == 0.0 {
        return if value == mid {
            0.0
        } else {
            config.degenerate_range_deviation
        };
    }

    (value - mid).abs() / half_span
}

pub fn deviation(result: &EnrichedResult, config: &ScoringConfig) -> f64 {
    range_deviation(result.value(), &result.biomarker.reference_range, config)
}

pub fn severity_for(status: ResultStatus, deviation: f64, config: &ScoringConfig) -> Severity {
    if status.is_normal() {
        Severity::Normal
    } else if deviation > config.severe_deviation_threshold {
        Severity::Severe
    } else {
        Severity::Mild
    }
}

pub fn severity(result: &EnrichedResult, config: &ScoringConfig) -> Severity {
    severity_for(result.status(), deviation(result, config), config)
}

pub fn classify(result: &EnrichedResult, config: &ScoringConfig) -> ResultDisplay {
    let deviation = deviation(result, config);
    let severity = severity_for(result.status(), deviation, config);

    let (label, icon) = match (result.status(), severity) {
        (ResultStatus::Normal, _) | (_, Severity::Normal) => ("Optimal", StatusIcon::Dot),
        (ResultStatus::High, Severity::Mild) => ("Slightly above optimal", StatusIcon::Dot),
        (ResultStatus::High, Severity::Severe) => ("Above optimal range", StatusIcon::ArrowUp),
        (ResultStatus::Low, Severity::Mild) => ("Slightly below optimal", StatusIcon::Dot),
        (ResultStatus::Low, Severity::Severe) => ("Below optimal range", StatusIcon::ArrowDown),
    };

    ResultDisplay {
        severity,
        label,
        icon,
        tone: severity.tone(),
        deviation,
    }
}
