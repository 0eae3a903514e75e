use super::domain::{parse_sampled_at, EnrichedResult, ResultStatus};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStats {
    pub in_range: usize,
    pub improvable: usize,
}

pub fn result_stats(results: &[EnrichedResult]) -> ResultStats {
    let in_range = results
        .iter()
        .filter(|result| result.status().is_normal())
        .count();
    ResultStats {
        in_range,
        improvable: results.len() - in_range,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub icon: &'static str,
    pub total: usize,
    pub attention: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub categories: Vec<CategoryCount>,
    pub total_attention: usize,
}

/// Per-category totals in the order of `categories`, which normally comes from the biomarker set.
pub fn category_summary(categories: &[String], results: &[EnrichedResult]) -> CategorySummary {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut total_attention = 0;

    for result in results {
        let entry = counts.entry(result.biomarker.category.as_str()).or_default();
        entry.0 += 1;
        if result.is_out_of_range() {
            entry.1 += 1;
            total_attention += 1;
        }
    }

    let categories = categories
        .iter()
        .map(|category| {
            let (total, attention) = counts.get(category.as_str()).copied().unwrap_or_default();
            CategoryCount {
                category: category.clone(),
                icon: category_icon(category),
                total,
                attention,
            }
        })
        .collect();

    CategorySummary {
        categories,
        total_attention,
    }
}

const FALLBACK_CATEGORY_ICON: &str = "📊";

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Lipids", "💧"),
    ("Metabolic", "⚡"),
    ("Kidney", "🫘"),
    ("Electrolytes", "⚖️"),
    ("Liver", "🟤"),
    ("Inflammation", "🔥"),
    ("Iron", "🩸"),
    ("Vitamins", "☀️"),
    ("Thyroid", "🦋"),
    ("Blood", "❤️"),
];

pub fn category_icon(category: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_CATEGORY_ICON)
}

struct CoachingTips {
    low: &'static str,
    high: &'static str,
}

const FALLBACK_TIPS: CoachingTips = CoachingTips {
    low: "Improving this marker may support your overall well-being.",
    high: "Optimizing this marker may support your overall well-being.",
};

const CATEGORY_TIPS: &[(&str, CoachingTips)] = &[
    (
        "Lipids",
        CoachingTips {
            low: "Improving this can support healthy cell function and energy.",
            high: "Optimizing this can support heart and vascular wellness.",
        },
    ),
    (
        "Metabolic",
        CoachingTips {
            low: "This marker plays a role in how your body processes energy.",
            high: "Improving this can help with energy balance and metabolism.",
        },
    ),
    (
        "Kidney",
        CoachingTips {
            low: "This reflects how well your body filters and balances fluids.",
            high: "Optimizing this can support kidney function and hydration.",
        },
    ),
    (
        "Electrolytes",
        CoachingTips {
            low: "Electrolyte balance affects energy, muscles, and hydration.",
            high: "Balancing this can help with energy levels and muscle function.",
        },
    ),
    (
        "Liver",
        CoachingTips {
            low: "This marker reflects how your body processes nutrients.",
            high: "Improving this can support your body's natural detox process.",
        },
    ),
    (
        "Inflammation",
        CoachingTips {
            low: "This marker reflects your body's immune and recovery activity.",
            high: "Lowering inflammation can improve energy and recovery.",
        },
    ),
    (
        "Iron",
        CoachingTips {
            low: "Iron supports oxygen transport and energy production.",
            high: "Balancing iron levels can support overall vitality.",
        },
    ),
    (
        "Vitamins",
        CoachingTips {
            low: "This vitamin supports immunity, energy, and daily well-being.",
            high: "Balancing this vitamin can support long-term wellness.",
        },
    ),
    (
        "Thyroid",
        CoachingTips {
            low: "Thyroid function influences metabolism and energy levels.",
            high: "Optimizing thyroid markers can improve energy and focus.",
        },
    ),
    (
        "Blood",
        CoachingTips {
            low: "This marker affects oxygen delivery and overall energy.",
            high: "Balancing this can support healthy circulation and vitality.",
        },
    ),
];

/// Category-specific nudge; anything other than a high status reads the low-side tip.
pub fn coaching_tip(result: &EnrichedResult) -> &'static str {
    let tips = CATEGORY_TIPS
        .iter()
        .find(|(category, _)| *category == result.biomarker.category)
        .map(|(_, tips)| tips)
        .unwrap_or(&FALLBACK_TIPS);

    match result.status() {
        ResultStatus::High => tips.high,
        ResultStatus::Low | ResultStatus::Normal => tips.low,
    }
}

pub fn interpretation(result: &EnrichedResult) -> String {
    let biomarker = &result.biomarker;
    let message = match result.status() {
        ResultStatus::Low => {
            "is below the normal range. Low values may indicate a deficiency. \
             Consider discussing with your healthcare provider."
        }
        ResultStatus::Normal => "is within the normal range. This indicates healthy function.",
        ResultStatus::High => {
            "is above the normal range. Elevated values may warrant further evaluation. \
             Consult with your healthcare provider."
        }
    };

    format!(
        "Your {} level of {} {} {} (Reference: {}–{} {})",
        biomarker.name,
        result.value(),
        biomarker.standard_unit,
        message,
        biomarker.reference_range.low,
        biomarker.reference_range.high,
        biomarker.standard_unit
    )
}

/// Most recent sample date in long form, e.g. "January 5, 2024"; empty without data.
pub fn report_date(results: &[EnrichedResult]) -> String {
    results
        .iter()
        .filter_map(|result| parse_sampled_at(result.sampled_at()))
        .max()
        .map(|latest| latest.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}
