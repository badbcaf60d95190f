//! Scripted user conversations and the chart each should produce.

pub struct Conversation {
    pub name: &'static str,
    pub messages: &'static [&'static str],
    pub skin_type: Option<&'static str>,
    pub concerns: &'static [&'static str],
    pub allergies: &'static [&'static str],
}

pub static CONVERSATIONS: &[Conversation] = &[
    Conversation {
        name: "oily teen",
        messages: &[
            "My skin gets really greasy by noon",
            "I keep getting pimples on my chin",
            "and some breakouts along the jaw",
        ],
        skin_type: Some("oily"),
        concerns: &["acne"],
        allergies: &[],
    },
    Conversation {
        name: "dry with allergies",
        messages: &[
            "My face feels tight after washing and I see fine lines",
            "I'm allergic to fragrance, lanolin. Also I cannot use retinol",
        ],
        skin_type: Some("dry"),
        concerns: &["aging"],
        allergies: &["fragrance", "retinol"],
    },
    Conversation {
        name: "latest type wins",
        messages: &[
            "I think it's combination, oily T-zone",
            "Actually it's totally normal now",
        ],
        skin_type: Some("normal"),
        concerns: &[],
        allergies: &[],
    },
    Conversation {
        name: "cue without indicator",
        messages: &["I avoid sugar and I can't use scrubs"],
        skin_type: None,
        concerns: &[],
        allergies: &[],
    },
    Conversation {
        name: "repeated allergen in new case",
        messages: &[
            "I had a reaction, I avoid Fragrance",
            "another allergy flare, I avoid fragrance",
        ],
        skin_type: None,
        concerns: &[],
        allergies: &["fragrance"],
    },
    Conversation {
        name: "sensitive redness",
        messages: &["Lots of redness and stinging around my nose"],
        skin_type: Some("sensitive"),
        concerns: &["rosacea", "sensitivity"],
        allergies: &[],
    },
];
