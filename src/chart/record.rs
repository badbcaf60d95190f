//! MedicalChart: the per-user skin profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a user (and their chart)
///
/// Serializes as a plain string. Newly issued ids are UUID v4, but any
/// string loaded from a store is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Issue a new random UserId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Skin type classification. A chart holds at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Sensitive,
    Normal,
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        SkinType::Oily,
        SkinType::Dry,
        SkinType::Combination,
        SkinType::Sensitive,
        SkinType::Normal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oily => "oily",
            Self::Dry => "dry",
            Self::Combination => "combination",
            Self::Sensitive => "sensitive",
            Self::Normal => "normal",
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SkinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown skin type '{}'", s))
    }
}

/// Skin concern labels tracked on a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinConcern {
    Acne,
    Aging,
    Hyperpigmentation,
    Rosacea,
    Eczema,
    Dryness,
    Sensitivity,
}

impl SkinConcern {
    pub const ALL: [SkinConcern; 7] = [
        SkinConcern::Acne,
        SkinConcern::Aging,
        SkinConcern::Hyperpigmentation,
        SkinConcern::Rosacea,
        SkinConcern::Eczema,
        SkinConcern::Dryness,
        SkinConcern::Sensitivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acne => "acne",
            Self::Aging => "aging",
            Self::Hyperpigmentation => "hyperpigmentation",
            Self::Rosacea => "rosacea",
            Self::Eczema => "eczema",
            Self::Dryness => "dryness",
            Self::Sensitivity => "sensitivity",
        }
    }
}

impl std::fmt::Display for SkinConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated skin assessment for one user
///
/// Every list is an ordered set: entries keep insertion order and appear
/// at most once. Field names serialize in camelCase so charts written by
/// earlier deployments (`users.json`) load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalChart {
    pub skin_type: Option<SkinType>,
    #[serde(default)]
    pub skin_concerns: Vec<SkinConcern>,
    /// Lower-cased, trimmed allergen strings
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub current_products: Vec<String>,
    #[serde(default)]
    pub skin_history: Vec<String>,
    #[serde(default)]
    pub environmental_factors: Vec<String>,
    #[serde(default)]
    pub lifestyle_factors: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl MedicalChart {
    /// Create an empty chart stamped with the current time
    pub fn new() -> Self {
        Self::created_at(Utc::now())
    }

    /// Create an empty chart stamped with `now`
    pub fn created_at(now: DateTime<Utc>) -> Self {
        Self {
            skin_type: None,
            skin_concerns: Vec::new(),
            allergies: Vec::new(),
            current_products: Vec::new(),
            skin_history: Vec::new(),
            environmental_factors: Vec::new(),
            lifestyle_factors: Vec::new(),
            last_updated: now,
        }
    }

    pub fn has_concern(&self, concern: SkinConcern) -> bool {
        self.skin_concerns.contains(&concern)
    }

    /// Advance `last_updated` to `now`, never moving it backwards.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = self.last_updated.max(now);
    }
}

impl Default for MedicalChart {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial overwrite of a chart, as sent by the chart editing interface.
///
/// A present field replaces the chart's field wholesale. `skin_type` is a
/// double option so that an explicit `null` clears the value while an
/// absent key leaves it alone. Unknown keys (including `lastUpdated`) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEdit {
    #[serde(default, deserialize_with = "present")]
    pub skin_type: Option<Option<SkinType>>,
    pub skin_concerns: Option<Vec<SkinConcern>>,
    pub allergies: Option<Vec<String>>,
    pub current_products: Option<Vec<String>>,
    pub skin_history: Option<Vec<String>>,
    pub environmental_factors: Option<Vec<String>>,
    pub lifestyle_factors: Option<Vec<String>>,
}

impl ChartEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skin_type(mut self, skin_type: Option<SkinType>) -> Self {
        self.skin_type = Some(skin_type);
        self
    }

    pub fn with_skin_concerns(mut self, concerns: Vec<SkinConcern>) -> Self {
        self.skin_concerns = Some(concerns);
        self
    }

    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = Some(allergies);
        self
    }

    pub fn with_current_products(mut self, products: Vec<String>) -> Self {
        self.current_products = Some(products);
        self
    }

    pub fn with_environmental_factors(mut self, factors: Vec<String>) -> Self {
        self.environmental_factors = Some(factors);
        self
    }

    pub fn with_lifestyle_factors(mut self, factors: Vec<String>) -> Self {
        self.lifestyle_factors = Some(factors);
        self
    }

    /// True when the edit carries no field at all
    pub fn is_empty(&self) -> bool {
        self.skin_type.is_none()
            && self.skin_concerns.is_none()
            && self.allergies.is_none()
            && self.current_products.is_none()
            && self.skin_history.is_none()
            && self.environmental_factors.is_none()
            && self.lifestyle_factors.is_none()
    }
}

/// Marks a key as present, keeping `null` distinguishable from absent.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<SkinType>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<SkinType>::deserialize(deserializer).map(Some)
}
