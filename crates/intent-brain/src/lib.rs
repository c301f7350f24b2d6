//! Keyword intent matching for the chat API.
//!
//! This crate turns a user's text into a bot reply. It defines:
//!
//! - [`Responder`] - The trait the message log uses to obtain replies
//! - [`IntentTable`] / [`IntentRule`] - A validated, ordered rule table
//! - [`IntentResponder`] - Substring matching with priority selection and
//!   a random fallback
//!
//! # Example
//!
//! ```rust
//! use intent_brain::{IntentResponder, Responder};
//!
//! let responder = IntentResponder::builtin();
//! let reply = responder.respond("Can you automate outbound?");
//! assert!(reply.starts_with("I can help you in automating your outbound"));
//! ```

mod builtin;
mod error;
mod responder;
mod rule;
mod trait_def;

pub use builtin::{builtin_table, FALLBACK_REPLIES};
pub use error::IntentError;
pub use responder::IntentResponder;
pub use rule::{IntentRule, IntentTable, Reply};
pub use trait_def::Responder;
