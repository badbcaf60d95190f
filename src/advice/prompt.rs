//! Chart summary and prompt composition

use crate::chart::MedicalChart;
use serde::{Deserialize, Serialize};

/// System message sent with every advice request.
pub const SYSTEM_MESSAGE: &str = "You are a professional dermatologist and skincare expert with extensive knowledge of skin conditions, treatments, and product recommendations.";

/// A composed request: system instructions plus the user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvicePrompt {
    pub system: String,
    pub user: String,
}

/// Render the chart as the profile block embedded in the prompt.
///
/// Only non-empty fields produce a line. Skin history is not included.
pub fn chart_summary(chart: &MedicalChart) -> String {
    let mut summary = String::from("PATIENT SKIN PROFILE:\n");

    if let Some(skin_type) = chart.skin_type {
        summary.push_str(&format!("- Skin Type: {}\n", skin_type));
    }

    let concerns: Vec<&str> = chart.skin_concerns.iter().map(|c| c.as_str()).collect();
    push_list(&mut summary, "Primary Concerns", &concerns);
    push_list(&mut summary, "Known Allergies/Reactions", &chart.allergies);
    push_list(&mut summary, "Current Products", &chart.current_products);
    push_list(&mut summary, "Environmental Factors", &chart.environmental_factors);
    push_list(&mut summary, "Lifestyle Factors", &chart.lifestyle_factors);

    summary
}

fn push_list<S: AsRef<str>>(summary: &mut String, label: &str, values: &[S]) {
    if values.is_empty() {
        return;
    }
    let joined: Vec<&str> = values.iter().map(|v| v.as_ref()).collect();
    summary.push_str(&format!("- {}: {}\n", label, joined.join(", ")));
}

/// Compose the advice prompt for `question` against `chart`.
pub fn compose_prompt(chart: &MedicalChart, question: &str) -> AdvicePrompt {
    let user = format!(
        "You are a professional dermatologist and skincare expert. Use the following patient information to provide personalized, evidence-based skincare advice:

{summary}

PATIENT QUESTION: {question}

Please provide:
1. A personalized response based on the patient's skin profile
2. Specific product recommendations (if applicable)
3. Lifestyle and routine suggestions
4. Any warnings or contraindications based on their allergies/sensitivities
5. When to consult a dermatologist

Keep your response professional, informative, and tailored to their specific skin concerns.",
        summary = chart_summary(chart),
        question = question,
    );

    AdvicePrompt {
        system: SYSTEM_MESSAGE.to_string(),
        user,
    }
}
