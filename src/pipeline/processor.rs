//! Chat pipeline orchestrator.
//!
//! Sequences `KeywordMatcher` → `select_action` → bank call (when asked for)
//! → reply formatting, and owns the mapping from every failure to a canned
//! user-facing string. `handle()` never returns an error.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::bank::{ApiReply, BankApi};
use crate::error::BankApiError;

use super::dialog::{select_action, Action, ApiCall, TextKey};
use super::nlu::KeywordMatcher;
use super::reply;

/// End-to-end message processor.
///
/// Stateless across calls: every message is parsed independently, and the
/// only shared data (keyword tables, mock catalog) is read-only, so one
/// pipeline value serves concurrent requests without locking.
pub struct ChatPipeline {
    matcher: KeywordMatcher,
    bank: Arc<dyn BankApi>,
}

impl ChatPipeline {
    /// Build the pipeline around a bank API client.
    pub fn new(bank: Arc<dyn BankApi>) -> Self {
        Self {
            matcher: KeywordMatcher::new(),
            bank,
        }
    }

    /// The matcher, for table sync checks against the catalog.
    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    /// Produce the bot reply for one user message.
    ///
    /// Infallible by construction: unknown cards, upstream error statuses
    /// and transport failures all map to canned strings here.
    pub async fn handle(&self, message: &str) -> String {
        let parsed = self.matcher.parse(message);
        let action = select_action(&parsed);
        debug!(?action, "selected action");

        match action {
            Action::Static(key) => reply::static_text(key).to_string(),
            Action::CallApi(call) => self.call_and_format(call).await,
        }
    }

    async fn call_and_format(&self, call: ApiCall) -> String {
        match call {
            ApiCall::ListCards => match self.bank.list_cards().await {
                Ok(ApiReply::Success { payload, .. }) => reply::format_card_list(&payload),
                Ok(ApiReply::Failure { status, message }) => {
                    self.degraded("list_cards", status, &message)
                }
                Err(e) => self.unavailable("list_cards", e),
            },
            ApiCall::CardDetails { card_id } => match self.bank.card_details(&card_id).await {
                Ok(ApiReply::Success { payload, .. }) => reply::format_card_details(&payload),
                // An unknown card is a user-recoverable miss, not a fault.
                Ok(ApiReply::Failure { status: 404, .. }) => {
                    debug!(card_id = %card_id, "card not found upstream");
                    reply::static_text(TextKey::CardNotFound).to_string()
                }
                Ok(ApiReply::Failure { status, message }) => {
                    self.degraded("card_details", status, &message)
                }
                Err(e) => self.unavailable("card_details", e),
            },
            ApiCall::Faq { topic } => match self.bank.faq_answer(&topic).await {
                Ok(ApiReply::Success { payload, .. }) => reply::format_faq(&payload),
                Ok(ApiReply::Failure { status, message }) => {
                    self.degraded("faq_answer", status, &message)
                }
                Err(e) => self.unavailable("faq_answer", e),
            },
            ApiCall::StartApplication { card_id } => {
                match self.bank.start_application(&card_id).await {
                    Ok(ApiReply::Success { payload, .. }) => {
                        reply::format_application_start(&payload)
                    }
                    Ok(ApiReply::Failure { status, message }) => {
                        self.degraded("start_application", status, &message)
                    }
                    Err(e) => self.unavailable("start_application", e),
                }
            }
        }
    }

    /// Upstream rejected the call; log for operators, apologize to the user.
    fn degraded(&self, op: &'static str, status: u16, message: &str) -> String {
        warn!(op, status, message, "bank API returned an error status");
        reply::static_text(TextKey::ApiError).to_string()
    }

    /// The call itself failed; log for operators, apologize to the user.
    fn unavailable(&self, op: &'static str, err: BankApiError) -> String {
        error!(op, error = %err, "bank API call failed");
        reply::static_text(TextKey::ApiError).to_string()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use regex::Regex;

    use crate::bank::{
        ApplicationReceipt, CardList, CardRecord, FaqAnswers, MockBankApi,
    };

    use super::*;

    fn pipeline() -> ChatPipeline {
        ChatPipeline::new(Arc::new(MockBankApi::new(
            "http://localhost:8888/api/simulated",
        )))
    }

    #[tokio::test]
    async fn unmatched_message_gets_the_fallback() {
        let bot = pipeline();
        let response = bot.handle("do you trade in tulip futures?").await;
        assert_eq!(response, reply::static_text(TextKey::Fallback));
    }

    #[tokio::test]
    async fn list_cards_names_every_product() {
        let bot = pipeline();
        let response = bot.handle("list cards").await;
        assert!(response.contains("Charan Bank Rewards Card"));
        assert!(response.contains("Charan Bank TravelMaster"));
        assert!(response.contains("Charan Bank SimpleCash"));
    }

    #[tokio::test]
    async fn travelmaster_details_include_name_details_and_eligibility() {
        let bot = pipeline();
        let response = bot.handle("tell me about travelmaster").await;
        assert!(response.contains("Charan Bank TravelMaster"));
        assert!(response.contains("Earn 3x miles on travel bookings"));
        assert!(response.contains("Minimum income $60,000/year."));
    }

    #[tokio::test]
    async fn fee_question_with_card_gets_full_details_not_faq() {
        let bot = pipeline();
        let response = bot.handle("what is the annual fee for simplecash").await;
        assert!(response.contains("**Charan Bank SimpleCash**"));
        // Fee figure lives inside the details line.
        assert!(response.contains("No Annual Fee"));
        assert!(!response.starts_with("Fees vary by card."));
    }

    #[tokio::test]
    async fn bare_fee_question_gets_the_general_faq_answer_verbatim() {
        let bot = pipeline();
        let response = bot.handle("fees").await;
        assert_eq!(
            response,
            "Fees vary by card. The Rewards Card is $50, TravelMaster is $150. \
             SimpleCash has no annual fee."
        );
    }

    #[tokio::test]
    async fn longest_match_prefers_cashback_card_over_card() {
        let bot = pipeline();
        let response = bot.handle("tell me about the cashback card").await;
        assert!(response.contains("Charan Bank SimpleCash"));
    }

    #[tokio::test]
    async fn applying_for_rewards_card_confirms_with_reference() {
        let bot = pipeline();
        let response = bot.handle("apply for the rewards card").await;
        assert!(response.contains("Charan Bank Rewards Card"));
        let pattern = Regex::new(r"APP-CB-REWARDS-\d+").unwrap();
        assert!(pattern.is_match(&response), "no reference in {response:?}");
    }

    #[tokio::test]
    async fn details_request_without_a_card_asks_which_one() {
        let bot = pipeline();
        let response = bot.handle("tell me about").await;
        assert_eq!(response, reply::static_text(TextKey::ClarifyCard));
    }

    #[tokio::test]
    async fn same_input_yields_identical_output() {
        let bot = pipeline();
        for message in [
            "hello",
            "list cards",
            "tell me about travelmaster",
            "apply for the rewards card",
            "gibberish input",
        ] {
            let first = bot.handle(message).await;
            let second = bot.handle(message).await;
            assert_eq!(first, second, "output diverged for {message:?}");
        }
    }

    #[tokio::test]
    async fn entity_table_stays_in_sync_with_the_catalog() {
        let bank = MockBankApi::new("http://localhost:8888/api/simulated");
        let catalog_ids: Vec<&str> = bank.catalog().iter().map(|c| c.id.as_str()).collect();
        let bot = pipeline();
        for id in bot.matcher().known_card_ids() {
            assert!(
                catalog_ids.contains(&id),
                "entity table produces {id} but the catalog has no such card"
            );
        }
    }

    // ── Degraded backend ────────────────────────────────────────────────

    /// Bank stub whose every call fails at the transport level.
    struct UnreachableBank;

    #[async_trait]
    impl BankApi for UnreachableBank {
        async fn list_cards(&self) -> Result<ApiReply<CardList>, BankApiError> {
            Err(BankApiError::Unreachable("connection refused".into()))
        }
        async fn card_details(
            &self,
            _card_id: &str,
        ) -> Result<ApiReply<CardRecord>, BankApiError> {
            Err(BankApiError::Unreachable("connection refused".into()))
        }
        async fn faq_answer(&self, _query: &str) -> Result<ApiReply<FaqAnswers>, BankApiError> {
            Err(BankApiError::Unreachable("connection refused".into()))
        }
        async fn start_application(
            &self,
            _card_id: &str,
        ) -> Result<ApiReply<ApplicationReceipt>, BankApiError> {
            Err(BankApiError::Unreachable("connection refused".into()))
        }
    }

    /// Bank stub that rejects everything with a server error.
    struct ServerErrorBank;

    #[async_trait]
    impl BankApi for ServerErrorBank {
        async fn list_cards(&self) -> Result<ApiReply<CardList>, BankApiError> {
            Ok(ApiReply::Failure {
                status: 500,
                message: "internal error".into(),
            })
        }
        async fn card_details(
            &self,
            _card_id: &str,
        ) -> Result<ApiReply<CardRecord>, BankApiError> {
            Ok(ApiReply::Failure {
                status: 404,
                message: "gone".into(),
            })
        }
        async fn faq_answer(&self, _query: &str) -> Result<ApiReply<FaqAnswers>, BankApiError> {
            Ok(ApiReply::Failure {
                status: 503,
                message: "maintenance".into(),
            })
        }
        async fn start_application(
            &self,
            _card_id: &str,
        ) -> Result<ApiReply<ApplicationReceipt>, BankApiError> {
            Ok(ApiReply::Failure {
                status: 400,
                message: "rejected".into(),
            })
        }
    }

    #[tokio::test]
    async fn transport_failure_becomes_the_api_error_apology() {
        let bot = ChatPipeline::new(Arc::new(UnreachableBank));
        let response = bot.handle("list cards").await;
        assert_eq!(response, reply::static_text(TextKey::ApiError));
    }

    #[tokio::test]
    async fn details_404_becomes_card_not_found_not_an_error() {
        let bot = ChatPipeline::new(Arc::new(ServerErrorBank));
        let response = bot.handle("tell me about travelmaster").await;
        assert_eq!(response, reply::static_text(TextKey::CardNotFound));
    }

    #[tokio::test]
    async fn other_error_statuses_become_the_api_error_apology() {
        let bot = ChatPipeline::new(Arc::new(ServerErrorBank));
        assert_eq!(
            bot.handle("list cards").await,
            reply::static_text(TextKey::ApiError)
        );
        assert_eq!(
            bot.handle("apply for the rewards card").await,
            reply::static_text(TextKey::ApiError)
        );
        assert_eq!(
            bot.handle("fees").await,
            reply::static_text(TextKey::ApiError)
        );
    }
}
