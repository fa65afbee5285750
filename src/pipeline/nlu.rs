//! Keyword-based NLU: intent classification and card entity extraction.
//!
//! Deliberately simple: literal substring containment against fixed keyword
//! tables. Intents are checked in declaration order and the first hit wins;
//! entity phrases are checked longest-first so "rewards card" beats "card".
//! Containment can match inside longer words ("history" contains "hi") —
//! that imprecision matches the deployed product and is kept on purpose.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Closed set of user goals the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greet,
    Goodbye,
    ListCards,
    CardDetails,
    AskFee,
    AskEligibility,
    StartApplication,
    Unknown,
}

impl Intent {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greet => "greet",
            Self::Goodbye => "goodbye",
            Self::ListCards => "list_cards",
            Self::CardDetails => "card_details",
            Self::AskFee => "ask_fee",
            Self::AskEligibility => "ask_eligibility",
            Self::StartApplication => "start_application",
            Self::Unknown => "unknown",
        }
    }
}

/// Result of parsing one user message. Fresh per message; no cross-turn state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub intent: Intent,
    pub card_id: Option<String>,
}

/// Intent trigger table, checked in declaration order (first match wins).
const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::Greet,
        &["hello", "hi", "hey", "good morning", "good afternoon"],
    ),
    (
        Intent::Goodbye,
        &["bye", "goodbye", "thanks", "thank you", "ok bye", "later"],
    ),
    (
        Intent::ListCards,
        &["options", "cards", "list cards", "show me cards", "what cards"],
    ),
    (
        Intent::CardDetails,
        &["tell me about", "details on", "more info", "info about", "what is the", "about the"],
    ),
    (
        Intent::AskFee,
        &["fee", "cost", "annual fee", "how much is"],
    ),
    (
        Intent::AskEligibility,
        &["eligible", "eligibility", "qualify", "requirements", "need for"],
    ),
    (
        Intent::StartApplication,
        &["apply", "application", "sign up", "get the card", "want the"],
    ),
];

/// Phrase → canonical card id. Must stay in sync with the mock catalog.
const ENTITY_PHRASES: &[(&str, &str)] = &[
    ("rewards card", "cb-rewards"),
    ("cb-rewards", "cb-rewards"),
    ("travelmaster", "cb-travel"),
    ("travel card", "cb-travel"),
    ("cb-travel", "cb-travel"),
    ("simplecash", "cb-cashback"),
    ("cashback card", "cb-cashback"),
    ("cb-cashback", "cb-cashback"),
];

/// Keyword matcher over the fixed intent and entity tables.
pub struct KeywordMatcher {
    intents: Vec<(Intent, Vec<&'static str>)>,
    /// Entity phrases sorted by descending length so longer phrases win.
    entities: Vec<(&'static str, &'static str)>,
}

impl KeywordMatcher {
    /// Build the matcher from the fixed tables.
    pub fn new() -> Self {
        let intents = INTENT_TRIGGERS
            .iter()
            .map(|(intent, keywords)| (*intent, keywords.to_vec()))
            .collect();

        let mut entities = ENTITY_PHRASES.to_vec();
        entities.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self { intents, entities }
    }

    /// Card ids the entity table can produce (for catalog sync checks).
    pub fn known_card_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.entities.iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Parse one message into an intent and an optional card id.
    pub fn parse(&self, message: &str) -> ParsedMessage {
        let lowered = message.to_lowercase();
        let text = lowered.trim();

        let mut intent = Intent::Unknown;
        for (candidate, keywords) in &self.intents {
            if keywords.iter().any(|kw| text.contains(kw)) {
                intent = *candidate;
                break;
            }
        }

        // Entity scan runs even for unknown intents: a card name alone
        // implies an information request.
        let mut card_id = None;
        for (phrase, id) in &self.entities {
            if text.contains(phrase) {
                card_id = Some((*id).to_string());
                if intent == Intent::Unknown {
                    intent = Intent::CardDetails;
                }
                break;
            }
        }

        let parsed = ParsedMessage { intent, card_id };
        debug!(
            message = %message,
            intent = parsed.intent.label(),
            card_id = ?parsed.card_id,
            "parsed message"
        );
        parsed
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}
