//! Chat message pipeline.
//!
//! Every message flows through:
//! 1. `KeywordMatcher::parse()` — intent + card entity from keyword tables
//! 2. `select_action()` — fixed decision table to the next action
//! 3. `BankApi` call — only when the selected action asks for one
//! 4. `reply` formatting — canned or templated user-facing text
//!
//! Messages are handled independently; there is no conversation memory.

pub mod dialog;
pub mod nlu;
pub mod processor;
pub mod reply;
