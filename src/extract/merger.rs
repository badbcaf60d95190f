//! Chart merger: applies extracted facts and edits to a chart
//!
//! Both operations are pure: they clone the existing chart and return the
//! replacement, leaving the argument untouched. Every call counts as an
//! update event and advances `last_updated`, which never moves backwards.

use super::extractor::ExtractedFacts;
use crate::chart::{ChartEdit, MedicalChart, SkinConcern};
use chrono::{DateTime, Utc};

/// Merge `facts` into `existing`, stamped with the current time.
pub fn merge(existing: &MedicalChart, facts: &ExtractedFacts) -> MedicalChart {
    merge_at(existing, facts, Utc::now())
}

/// Merge `facts` into `existing`, stamped with `now`.
///
/// Accumulation is monotonic: a skin type is only ever replaced by a newer
/// match, and concerns/allergies are only appended. Merging the same facts
/// again changes nothing but the timestamp.
pub fn merge_at(
    existing: &MedicalChart,
    facts: &ExtractedFacts,
    now: DateTime<Utc>,
) -> MedicalChart {
    let mut chart = existing.clone();

    if let Some(skin_type) = facts.skin_type {
        chart.skin_type = Some(skin_type);
    }

    for concern in &facts.concerns {
        if !chart.has_concern(*concern) {
            chart.skin_concerns.push(*concern);
        }
    }

    for allergen in &facts.allergens {
        let allergen = allergen.trim().to_lowercase();
        if allergen.is_empty() {
            continue;
        }
        if !chart.allergies.iter().any(|a| a.to_lowercase() == allergen) {
            chart.allergies.push(allergen);
        }
    }

    chart.touch(now);
    chart
}

/// Apply a direct edit to `existing`, stamped with the current time.
pub fn apply_edit(existing: &MedicalChart, edit: &ChartEdit) -> MedicalChart {
    apply_edit_at(existing, edit, Utc::now())
}

/// Apply a direct edit to `existing`, stamped with `now`.
///
/// Present fields replace the chart field wholesale. List values are
/// normalized into ordered sets (trimmed, blanks dropped, first occurrence
/// kept); allergies are also lower-cased.
pub fn apply_edit_at(
    existing: &MedicalChart,
    edit: &ChartEdit,
    now: DateTime<Utc>,
) -> MedicalChart {
    let mut chart = existing.clone();

    if let Some(skin_type) = edit.skin_type {
        chart.skin_type = skin_type;
    }
    if let Some(concerns) = &edit.skin_concerns {
        chart.skin_concerns = dedup_concerns(concerns);
    }
    if let Some(allergies) = &edit.allergies {
        let lowered: Vec<String> = allergies.iter().map(|a| a.to_lowercase()).collect();
        chart.allergies = normalize_entries(&lowered);
    }
    if let Some(products) = &edit.current_products {
        chart.current_products = normalize_entries(products);
    }
    if let Some(history) = &edit.skin_history {
        chart.skin_history = normalize_entries(history);
    }
    if let Some(factors) = &edit.environmental_factors {
        chart.environmental_factors = normalize_entries(factors);
    }
    if let Some(factors) = &edit.lifestyle_factors {
        chart.lifestyle_factors = normalize_entries(factors);
    }

    chart.touch(now);
    chart
}

fn dedup_concerns(concerns: &[SkinConcern]) -> Vec<SkinConcern> {
    let mut out = Vec::with_capacity(concerns.len());
    for concern in concerns {
        if !out.contains(concern) {
            out.push(*concern);
        }
    }
    out
}

fn normalize_entries(entries: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.trim();
        if !entry.is_empty() && !out.iter().any(|e| e == entry) {
            out.push(entry.to_string());
        }
    }
    out
}
