//! Chart extractor: free text to skin-profile facts
//!
//! Matching is literal: lower-cased substring lookups for skin type and
//! concerns, and cue-phrase capture for allergens. There is no entity
//! recognition, so allergen capture is a best-effort heuristic. Anything
//! between a cue phrase and the next comma or period is taken as the
//! allergen, e.g. "allergic to the sun in summer" yields
//! "the sun in summer".

use super::keywords::{
    ALLERGEN_CUES, ALLERGY_INDICATORS, CONCERN_TABLE, SKIN_TYPE_TABLE, TRAILING_CONNECTIVES,
};
use crate::chart::{SkinConcern, SkinType};
use regex_lite::Regex;
use serde::Serialize;

/// Facts derived from one piece of user text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFacts {
    /// First skin type matched in table order, if any
    pub skin_type: Option<SkinType>,
    /// Matched concerns in table order, without duplicates
    pub concerns: Vec<SkinConcern>,
    /// Lower-cased allergen captures in order of appearance
    pub allergens: Vec<String>,
}

impl ExtractedFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.skin_type.is_none() && self.concerns.is_empty() && self.allergens.is_empty()
    }
}

/// Derives [`ExtractedFacts`] from free text.
///
/// Extraction is total: every string, including the empty one, produces a
/// (possibly empty) result.
#[derive(Debug, Clone)]
pub struct ChartExtractor {
    /// One pattern per cue group, applied in group order
    cue_patterns: Vec<Regex>,
}

impl ChartExtractor {
    pub fn new() -> Self {
        let cue_patterns = ALLERGEN_CUES
            .iter()
            .map(|group| {
                let alternatives: Vec<String> =
                    group.iter().map(|cue| regex_lite::escape(cue)).collect();
                let pattern = format!(r"(?i)(?:{})\s+", alternatives.join("|"));
                Regex::new(&pattern).expect("cue phrases form a valid pattern")
            })
            .collect();
        Self { cue_patterns }
    }

    /// Extract skin type, concerns and allergens from `text`.
    pub fn extract(&self, text: &str) -> ExtractedFacts {
        let lowered = text.to_lowercase();

        let mut facts = ExtractedFacts {
            skin_type: detect_skin_type(&lowered),
            concerns: detect_concerns(&lowered),
            allergens: Vec::new(),
        };

        if ALLERGY_INDICATORS.iter().any(|p| lowered.contains(*p)) {
            facts.allergens = self.capture_allergens(text);
        }

        facts
    }

    /// Capture allergen phrases from the original-case text.
    ///
    /// A capture starts after a cue phrase and its whitespace, and stops at
    /// the next comma, period, or the start of another cue phrase. Trailing
    /// connectives are dropped so "fragrance and cannot use retinol" splits
    /// into "fragrance" and "retinol".
    fn capture_allergens(&self, text: &str) -> Vec<String> {
        let cue_starts: Vec<usize> = self
            .cue_patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.start()))
            .collect();

        let mut allergens: Vec<String> = Vec::new();
        for re in &self.cue_patterns {
            for m in re.find_iter(text) {
                let rest = &text[m.end()..];
                let mut end = rest
                    .find(|c: char| c == ',' || c == '.')
                    .unwrap_or(rest.len());
                if let Some(next_cue) = cue_starts.iter().filter(|&&s| s >= m.end()).min() {
                    end = end.min(next_cue - m.end());
                }

                let allergen = strip_trailing_connectives(rest[..end].trim()).to_lowercase();
                if !allergen.is_empty() && !allergens.contains(&allergen) {
                    allergens.push(allergen);
                }
            }
        }
        allergens
    }
}

impl Default for ChartExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered traversal with early exit: first label in table order wins.
fn detect_skin_type(lowered: &str) -> Option<SkinType> {
    for entry in SKIN_TYPE_TABLE {
        if entry.matches(lowered) {
            return Some(entry.label);
        }
    }
    None
}

fn detect_concerns(lowered: &str) -> Vec<SkinConcern> {
    let mut concerns = Vec::new();
    for entry in CONCERN_TABLE {
        if entry.matches(lowered) && !concerns.contains(&entry.label) {
            concerns.push(entry.label);
        }
    }
    concerns
}

fn strip_trailing_connectives(mut s: &str) -> &str {
    loop {
        s = s.trim_end();
        match s.rsplit_once(char::is_whitespace) {
            Some((head, last))
                if TRAILING_CONNECTIVES
                    .iter()
                    .any(|w| last.eq_ignore_ascii_case(w)) =>
            {
                s = head;
            }
            _ => return s,
        }
    }
}
