//! Canned responses and bank payload formatting.

use crate::bank::{ApplicationReceipt, CardList, CardRecord, FaqAnswers};

use super::dialog::TextKey;

/// Canned response for a static action.
pub fn static_text(key: TextKey) -> &'static str {
    match key {
        TextKey::Greet => "Hello! How can I help you with Charan's Bank credit cards today?",
        TextKey::Goodbye => "You're welcome! Feel free to ask if anything else comes up. Goodbye!",
        TextKey::Fallback => {
            "I'm sorry, I didn't quite understand that. You can ask me to 'list cards', \
             'tell me about the rewards card', ask about 'fees' or 'eligibility', or \
             'apply for simplecash'."
        }
        TextKey::ClarifyCard => {
            "Which credit card are you interested in? (e.g., Rewards Card, TravelMaster, SimpleCash)"
        }
        TextKey::ClarifyApply => {
            "Sure, I can help with that. Which credit card would you like to apply for? \
             (e.g., Rewards Card, TravelMaster, SimpleCash)"
        }
        TextKey::ApiError => {
            "Sorry, I encountered an issue trying to get that information from our systems \
             right now. Please try again in a moment."
        }
        TextKey::CardNotFound => {
            "Hmm, I couldn't find information for the specific card you mentioned. Could you \
             please check the name (e.g., Rewards Card, TravelMaster, SimpleCash)?"
        }
    }
}

/// Bulleted listing of the card catalog.
pub fn format_card_list(list: &CardList) -> String {
    if list.cards.is_empty() {
        return "It seems we don't have any cards listed right now.".to_string();
    }
    let lines: Vec<String> = list
        .cards
        .iter()
        .map(|card| format!("{} ({})", card.name, card.summary))
        .collect();
    format!(
        "Here are the credit cards we offer:\n - {}\nWhich one would you like to know more about?",
        lines.join("\n - ")
    )
}

/// Name, details and eligibility lines for a single card.
pub fn format_card_details(card: &CardRecord) -> String {
    if card.name.is_empty() {
        return static_text(TextKey::CardNotFound).to_string();
    }
    format!(
        "**{}**\n*   **Details:** {}\n*   **Eligibility:** {}",
        card.name, card.details, card.eligibility
    )
}

/// First FAQ answer, or the generic fallback when the lookup came back empty.
pub fn format_faq(answers: &FaqAnswers) -> String {
    answers
        .faqs
        .first()
        .map(|faq| faq.answer.clone())
        .unwrap_or_else(|| static_text(TextKey::Fallback).to_string())
}

/// Confirmation text for a freshly started application.
pub fn format_application_start(receipt: &ApplicationReceipt) -> String {
    if receipt.message.is_empty() {
        return "Okay, the application process has been started.".to_string();
    }
    if receipt.application_reference.is_empty() {
        receipt.message.clone()
    } else {
        format!(
            "{} Your application reference is {}.",
            receipt.message, receipt.application_reference
        )
    }
}
