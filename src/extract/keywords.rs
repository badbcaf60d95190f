//! Keyword tables driving chart extraction
//!
//! Trigger phrases are lower-case substrings matched against lower-cased
//! input. They are not word-boundary aware: "dry" also fires on "dryer".

use crate::chart::{SkinConcern, SkinType};

/// A label and the phrases that select it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordEntry<L> {
    pub label: L,
    pub triggers: &'static [&'static str],
}

impl<L> KeywordEntry<L> {
    /// True if any trigger occurs in `lowered`. The caller lower-cases once.
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(*t))
    }
}

/// Skin-type table. Order is significant: the first matching entry wins.
pub static SKIN_TYPE_TABLE: &[KeywordEntry<SkinType>] = &[
    KeywordEntry {
        label: SkinType::Oily,
        triggers: &["oily", "greasy", "shiny", "acne-prone"],
    },
    KeywordEntry {
        label: SkinType::Dry,
        triggers: &["dry", "flaky", "tight", "rough"],
    },
    KeywordEntry {
        label: SkinType::Combination,
        triggers: &["combination", "t-zone", "mixed"],
    },
    KeywordEntry {
        label: SkinType::Sensitive,
        triggers: &["sensitive", "redness", "irritation", "burning"],
    },
    KeywordEntry {
        label: SkinType::Normal,
        triggers: &["normal", "balanced", "healthy"],
    },
];

/// Concern table. Every matching entry contributes its label.
pub static CONCERN_TABLE: &[KeywordEntry<SkinConcern>] = &[
    KeywordEntry {
        label: SkinConcern::Acne,
        triggers: &["acne", "pimples", "breakouts", "zits"],
    },
    KeywordEntry {
        label: SkinConcern::Aging,
        triggers: &["aging", "wrinkles", "fine lines", "anti-aging"],
    },
    KeywordEntry {
        label: SkinConcern::Hyperpigmentation,
        triggers: &["dark spots", "hyperpigmentation", "melasma", "sun spots"],
    },
    KeywordEntry {
        label: SkinConcern::Rosacea,
        triggers: &["rosacea", "redness", "flushing"],
    },
    KeywordEntry {
        label: SkinConcern::Eczema,
        triggers: &["eczema", "dermatitis", "itchy"],
    },
    KeywordEntry {
        label: SkinConcern::Dryness,
        triggers: &["dry", "dehydrated", "flaky"],
    },
    KeywordEntry {
        label: SkinConcern::Sensitivity,
        triggers: &["sensitive", "irritation", "burning", "stinging"],
    },
];

/// Phrases that gate allergen capture. Without one of these, cue phrases
/// are ignored entirely.
pub static ALLERGY_INDICATORS: &[&str] = &["allergic", "allergy", "reaction", "break out"];

/// Cue phrases that introduce an allergen, in application order.
pub static ALLERGEN_CUES: &[&[&str]] = &[
    &["allergic to", "allergy to", "reacts to"],
    &["can't use", "cannot use", "avoid"],
];

/// Words dropped from the end of an allergen capture.
pub static TRAILING_CONNECTIVES: &[&str] = &["and", "or", "but"];

/// Look up the trigger phrases for a skin type.
pub fn skin_type_triggers(label: SkinType) -> &'static [&'static str] {
    SKIN_TYPE_TABLE
        .iter()
        .find(|e| e.label == label)
        .map(|e| e.triggers)
        .unwrap_or(&[])
}

/// Look up the trigger phrases for a concern.
pub fn concern_triggers(label: SkinConcern) -> &'static [&'static str] {
    CONCERN_TABLE
        .iter()
        .find(|e| e.label == label)
        .map(|e| e.triggers)
        .unwrap_or(&[])
}
