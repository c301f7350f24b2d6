//! Intent responder - substring intent matching with a random fallback.

use chrono::Local;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::builtin::builtin_table;
use crate::rule::IntentTable;
use crate::trait_def::Responder;

/// Reply used only if a table somehow has no fallbacks.
const LAST_RESORT_REPLY: &str = "I'm not sure I understand. Could you rephrase that?";

/// Answers user text from an [`IntentTable`].
///
/// The text is lowercased and trimmed, and among the rules with a keyword
/// contained in it the highest-priority one wins (earliest rule on ties).
/// Without a match a fallback reply is picked uniformly at random.
#[derive(Debug, Clone)]
pub struct IntentResponder {
    table: IntentTable,
}

impl IntentResponder {
    /// Create a responder over a custom table.
    pub fn new(table: IntentTable) -> Self {
        Self { table }
    }

    /// Create a responder over the built-in product table.
    pub fn builtin() -> Self {
        Self::new(builtin_table())
    }

    /// The table this responder answers from.
    pub fn table(&self) -> &IntentTable {
        &self.table
    }

    fn fallback(&self) -> String {
        self.table
            .fallbacks()
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| LAST_RESORT_REPLY.to_string())
    }
}

impl Default for IntentResponder {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase and trim; no other normalization is applied.
fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

impl Responder for IntentResponder {
    fn respond(&self, user_text: &str) -> String {
        let normalized = normalize(user_text);

        match self.table.best_match(&normalized) {
            Some(rule) => {
                debug!(priority = rule.priority, keyword = ?rule.keywords.first(), "Matched intent");
                rule.reply.render(&Local::now())
            }
            None => {
                debug!("No intent matched, using fallback");
                self.fallback()
            }
        }
    }

    fn name(&self) -> &str {
        "IntentResponder"
    }
}
