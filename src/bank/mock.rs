//! In-memory simulation of the bank's credit-card API.
//!
//! Stands in for the real Charan Bank backend: a fixed three-card catalog, a
//! small FAQ table, and synthetic application references. Each call logs the
//! request it would have made against the configured base URL.

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;
use tracing::debug;

use super::{
    ApiReply, ApplicationReceipt, BankApi, CardList, CardRecord, CardSummary, FaqAnswers, FaqEntry,
};
use crate::error::BankApiError;

/// FAQ keyword → canned answer. First substring match against the query wins.
const FAQS: &[(&str, &str)] = &[
    (
        "fee",
        "Fees vary by card. The Rewards Card is $50, TravelMaster is $150. SimpleCash has no annual fee.",
    ),
    (
        "eligibility",
        "Eligibility depends on the card, income, and credit score. Please check the details for each card.",
    ),
    (
        "apply",
        "You can start an application by telling me which card you want to apply for.",
    ),
];

/// Answer returned when no FAQ keyword matches the query.
const GENERAL_FAQ: &str = "You can ask about card options, fees, benefits, and how to apply.";

/// Mock bank API over an immutable in-memory catalog.
pub struct MockBankApi {
    base_url: String,
    catalog: Vec<CardRecord>,
    /// Per-process salt for application references: stable within a run,
    /// different across runs, like the reference numbers the real backend
    /// hands out.
    ref_seed: u64,
}

impl MockBankApi {
    /// Create the mock with the default card catalog.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            catalog: default_catalog(),
            ref_seed: rand::random(),
        }
    }

    /// The full card catalog, in listing order.
    pub fn catalog(&self) -> &[CardRecord] {
        &self.catalog
    }

    fn find(&self, card_id: &str) -> Option<&CardRecord> {
        self.catalog.iter().find(|c| c.id == card_id)
    }

    fn application_reference(&self, card_id: &str) -> String {
        let mut hasher = DefaultHasher::new();
        self.ref_seed.hash(&mut hasher);
        card_id.hash(&mut hasher);
        format!("APP-{}-{}", card_id.to_uppercase(), hasher.finish() % 10_000)
    }
}

/// The three-card product line, in the order the bank lists it.
fn default_catalog() -> Vec<CardRecord> {
    vec![
        CardRecord {
            id: "cb-rewards".into(),
            name: "Charan Bank Rewards Card".into(),
            summary: "Earn points on every purchase.".into(),
            details: "Earn 2x points on groceries, 1x on everything else. Annual Fee: $50. APR: 18.99%.".into(),
            eligibility: "Minimum income $30,000/year.".into(),
        },
        CardRecord {
            id: "cb-travel".into(),
            name: "Charan Bank TravelMaster".into(),
            summary: "Airline miles and travel perks.".into(),
            details: "Earn 3x miles on travel bookings, lounge access. Annual Fee: $150. APR: 21.99%.".into(),
            eligibility: "Minimum income $60,000/year. Good credit score required.".into(),
        },
        CardRecord {
            id: "cb-cashback".into(),
            name: "Charan Bank SimpleCash".into(),
            summary: "Flat cashback on all spending.".into(),
            details: "Earn 1.5% cashback on all purchases. No Annual Fee. APR: 19.99%.".into(),
            eligibility: "Minimum income $25,000/year.".into(),
        },
    ]
}

#[async_trait]
impl BankApi for MockBankApi {
    async fn list_cards(&self) -> Result<ApiReply<CardList>, BankApiError> {
        let url = format!("{}/credit-cards", self.base_url);
        debug!(%url, "simulated bank API call");
        let cards = self
            .catalog
            .iter()
            .map(|c| CardSummary {
                id: c.id.clone(),
                name: c.name.clone(),
                summary: c.summary.clone(),
            })
            .collect();
        Ok(ApiReply::Success {
            status: 200,
            payload: CardList { cards },
        })
    }

    async fn card_details(&self, card_id: &str) -> Result<ApiReply<CardRecord>, BankApiError> {
        let url = format!("{}/credit-cards/{}", self.base_url, card_id);
        debug!(%url, "simulated bank API call");
        match self.find(card_id) {
            Some(card) => Ok(ApiReply::Success {
                status: 200,
                payload: card.clone(),
            }),
            None => Ok(ApiReply::Failure {
                status: 404,
                message: format!("Card '{card_id}' not found"),
            }),
        }
    }

    async fn faq_answer(&self, query: &str) -> Result<ApiReply<FaqAnswers>, BankApiError> {
        let url = format!("{}/faqs/credit-cards?query={}", self.base_url, query);
        debug!(%url, "simulated bank API call");
        let query_lower = query.to_lowercase();
        let entry = FAQS
            .iter()
            .find(|(keyword, _)| query_lower.contains(keyword))
            .map(|(keyword, answer)| FaqEntry {
                question: format!("Info about {keyword}"),
                answer: (*answer).to_string(),
            })
            .unwrap_or_else(|| FaqEntry {
                question: "General Info".into(),
                answer: GENERAL_FAQ.into(),
            });
        Ok(ApiReply::Success {
            status: 200,
            payload: FaqAnswers { faqs: vec![entry] },
        })
    }

    async fn start_application(
        &self,
        card_id: &str,
    ) -> Result<ApiReply<ApplicationReceipt>, BankApiError> {
        let url = format!("{}/applications/credit-card/start", self.base_url);
        debug!(%url, card_id, "simulated bank API call");
        match self.find(card_id) {
            Some(card) => Ok(ApiReply::Success {
                status: 201,
                payload: ApplicationReceipt {
                    message: format!(
                        "Application process initiated for {}. Follow up instructions will be provided.",
                        card.name
                    ),
                    application_reference: self.application_reference(card_id),
                },
            }),
            None => Ok(ApiReply::Failure {
                status: 400,
                message: format!("Cannot start application for unknown card '{card_id}'"),
            }),
        }
    }
}
