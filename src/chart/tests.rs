//! Serialization tests against the users.json record format

use super::*;
use serde_json::{json, Value};

/// Fixture: a chart as stored in users.json by earlier releases
fn stored_chart_fixture() -> Value {
    json!({
        "skinType": "combination",
        "skinConcerns": ["acne", "hyperpigmentation"],
        "allergies": ["fragrance"],
        "currentProducts": ["cerave cleanser"],
        "skinHistory": [],
        "environmentalFactors": ["humid climate"],
        "lifestyleFactors": [],
        "lastUpdated": "2025-03-14T09:26:53.589Z"
    })
}

/// Fixture: a freshly initialized chart
fn empty_chart_fixture() -> Value {
    json!({
        "skinType": null,
        "skinConcerns": [],
        "allergies": [],
        "currentProducts": [],
        "skinHistory": [],
        "environmentalFactors": [],
        "lifestyleFactors": [],
        "lastUpdated": "2025-03-14T09:00:00.000Z"
    })
}

#[test]
fn test_stored_chart_deserializes() {
    let chart: MedicalChart = serde_json::from_value(stored_chart_fixture()).unwrap();

    assert_eq!(chart.skin_type, Some(SkinType::Combination));
    assert_eq!(
        chart.skin_concerns,
        vec![SkinConcern::Acne, SkinConcern::Hyperpigmentation]
    );
    assert_eq!(chart.allergies, vec!["fragrance"]);
    assert_eq!(chart.current_products, vec!["cerave cleanser"]);
    assert_eq!(chart.environmental_factors, vec!["humid climate"]);
    assert!(chart.lifestyle_factors.is_empty());
}

#[test]
fn test_empty_chart_deserializes() {
    let chart: MedicalChart = serde_json::from_value(empty_chart_fixture()).unwrap();
    assert_eq!(chart.skin_type, None);
    assert!(chart.skin_concerns.is_empty());
    assert!(chart.allergies.is_empty());
}

#[test]
fn test_missing_lists_default_to_empty() {
    let chart: MedicalChart = serde_json::from_value(json!({
        "skinType": "dry",
        "lastUpdated": "2025-03-14T09:00:00Z"
    }))
    .unwrap();

    assert_eq!(chart.skin_type, Some(SkinType::Dry));
    assert!(chart.skin_concerns.is_empty());
    assert!(chart.skin_history.is_empty());
}

#[test]
fn test_unknown_concern_is_rejected() {
    let result: Result<MedicalChart, _> = serde_json::from_value(json!({
        "skinType": null,
        "skinConcerns": ["freckles"],
        "lastUpdated": "2025-03-14T09:00:00Z"
    }));
    assert!(result.is_err());
}

#[test]
fn test_chart_serializes_camel_case() {
    let chart: MedicalChart = serde_json::from_value(stored_chart_fixture()).unwrap();
    let value = serde_json::to_value(&chart).unwrap();

    assert_eq!(value["skinType"], "combination");
    assert_eq!(value["skinConcerns"], json!(["acne", "hyperpigmentation"]));
    assert!(value.get("lastUpdated").is_some());
    assert!(value.get("skin_type").is_none());
}

#[test]
fn test_new_chart_is_empty() {
    let chart = MedicalChart::new();
    assert!(chart.skin_type.is_none());
    assert!(chart.skin_concerns.is_empty());
    assert!(chart.allergies.is_empty());
    assert!(chart.current_products.is_empty());
    assert!(chart.environmental_factors.is_empty());
    assert!(chart.lifestyle_factors.is_empty());
}

#[test]
fn test_user_id_is_transparent_string() {
    let id = UserId::from_string("abc-123");
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc-123"));
    assert_ne!(UserId::new(), UserId::new());
}

#[test]
fn test_skin_type_from_str() {
    assert_eq!("Oily".parse::<SkinType>().unwrap(), SkinType::Oily);
    assert_eq!(" normal ".parse::<SkinType>().unwrap(), SkinType::Normal);
    assert!("greasy".parse::<SkinType>().is_err());
}

// ========================================================================
// ChartEdit
// ========================================================================

#[test]
fn test_edit_absent_skin_type_is_none() {
    let edit: ChartEdit = serde_json::from_value(json!({
        "currentProducts": ["sunscreen"]
    }))
    .unwrap();

    assert_eq!(edit.skin_type, None);
    assert_eq!(edit.current_products, Some(vec!["sunscreen".to_string()]));
}

#[test]
fn test_edit_null_skin_type_clears() {
    let edit: ChartEdit = serde_json::from_value(json!({ "skinType": null })).unwrap();
    assert_eq!(edit.skin_type, Some(None));
}

#[test]
fn test_edit_ignores_unknown_and_timestamp_fields() {
    let edit: ChartEdit = serde_json::from_value(json!({
        "skinType": "normal",
        "lastUpdated": "1999-01-01T00:00:00Z",
        "favouriteColour": "blue"
    }))
    .unwrap();

    assert_eq!(edit.skin_type, Some(Some(SkinType::Normal)));
    assert!(!edit.is_empty());
}

#[test]
fn test_empty_edit() {
    let edit: ChartEdit = serde_json::from_value(json!({})).unwrap();
    assert!(edit.is_empty());
}
