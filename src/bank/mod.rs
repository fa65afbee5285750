//! Bank API collaborator boundary.
//!
//! `BankApi` is the seam where a real HTTP client would sit; the shipped
//! implementation is [`MockBankApi`], an in-memory simulation of the
//! upstream REST surface. Every operation yields a payload plus an
//! HTTP-style status code so the caller dispatches exactly the way it would
//! on a real response.

pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BankApiError;

pub use mock::MockBankApi;

// ── Payload types ───────────────────────────────────────────────────────

/// A credit-card product record from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub details: String,
    pub eligibility: String,
}

/// Abbreviated card entry returned by the list operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub summary: String,
}

/// Payload of [`BankApi::list_cards`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardList {
    pub cards: Vec<CardSummary>,
}

/// A question/answer pair returned by the FAQ lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}

/// Payload of [`BankApi::faq_answer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqAnswers {
    pub faqs: Vec<FaqEntry>,
}

/// Payload of [`BankApi::start_application`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationReceipt {
    pub message: String,
    pub application_reference: String,
}

// ── Reply envelope ──────────────────────────────────────────────────────

/// Payload plus HTTP-style status, mirroring the upstream REST contract.
#[derive(Debug, Clone)]
pub enum ApiReply<T> {
    /// 2xx with a decoded payload.
    Success { status: u16, payload: T },
    /// Non-2xx with the upstream error message.
    Failure { status: u16, message: String },
}

impl<T> ApiReply<T> {
    /// Status code regardless of outcome.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }
}

// ── The API surface ─────────────────────────────────────────────────────

/// The bank's credit-card API.
///
/// A production deployment would implement this with a real HTTP client
/// against the configured base URL; the shipped binary and the tests use
/// [`MockBankApi`]. A transport-level failure surfaces as `BankApiError`,
/// an upstream rejection as [`ApiReply::Failure`].
#[async_trait]
pub trait BankApi: Send + Sync {
    /// `GET /credit-cards` — all products, abbreviated. Always 200.
    async fn list_cards(&self) -> Result<ApiReply<CardList>, BankApiError>;

    /// `GET /credit-cards/{card_id}` — full record, or 404 when unknown.
    async fn card_details(&self, card_id: &str) -> Result<ApiReply<CardRecord>, BankApiError>;

    /// `GET /faqs/credit-cards?query=…` — first keyword match, with a
    /// general fallback answer. Always 200.
    async fn faq_answer(&self, query: &str) -> Result<ApiReply<FaqAnswers>, BankApiError>;

    /// `POST /applications/credit-card/start` — 201 with a confirmation and
    /// application reference, or 400 when the card is unknown.
    async fn start_application(
        &self,
        card_id: &str,
    ) -> Result<ApiReply<ApplicationReceipt>, BankApiError>;
}
