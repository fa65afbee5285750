//! Action selection: fixed decision table from parsed message to next action.

use super::nlu::{Intent, ParsedMessage};

/// Keys into the static response table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Greet,
    Goodbye,
    Fallback,
    ClarifyCard,
    ClarifyApply,
    ApiError,
    CardNotFound,
}

/// A backend operation with its arguments, resolved at selection time.
///
/// Closed enum instead of a name-dispatched call table: an unknown operation
/// cannot be requested, so that failure class does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListCards,
    CardDetails { card_id: String },
    Faq { topic: String },
    StartApplication { card_id: String },
}

/// What the orchestrator should do with a parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Emit a canned string from the static response table.
    Static(TextKey),
    /// Invoke a bank API operation and format its result.
    CallApi(ApiCall),
}

/// Decision table from intent and extracted card id to the next action.
///
/// Pure function, total over `Intent`; no side effects.
pub fn select_action(parsed: &ParsedMessage) -> Action {
    match (parsed.intent, parsed.card_id.clone()) {
        (Intent::Greet, _) => Action::Static(TextKey::Greet),
        (Intent::Goodbye, _) => Action::Static(TextKey::Goodbye),
        (Intent::ListCards, _) => Action::CallApi(ApiCall::ListCards),
        (Intent::CardDetails, Some(card_id)) => Action::CallApi(ApiCall::CardDetails { card_id }),
        (Intent::CardDetails, None) => Action::Static(TextKey::ClarifyCard),
        // Fee and eligibility answers are included in the card details text,
        // so a known card routes to the details lookup.
        (Intent::AskFee, Some(card_id)) => Action::CallApi(ApiCall::CardDetails { card_id }),
        (Intent::AskFee, None) => Action::CallApi(ApiCall::Faq {
            topic: "fee".into(),
        }),
        (Intent::AskEligibility, Some(card_id)) => {
            Action::CallApi(ApiCall::CardDetails { card_id })
        }
        (Intent::AskEligibility, None) => Action::CallApi(ApiCall::Faq {
            topic: "eligibility".into(),
        }),
        (Intent::StartApplication, Some(card_id)) => {
            Action::CallApi(ApiCall::StartApplication { card_id })
        }
        (Intent::StartApplication, None) => Action::Static(TextKey::ClarifyApply),
        (Intent::Unknown, _) => Action::Static(TextKey::Fallback),
    }
}
