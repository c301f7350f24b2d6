//! Intent rules and the validated rule table.

use chrono::{DateTime, TimeZone};

use crate::error::IntentError;

/// What a rule answers with when it wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Fixed reply text.
    Text(String),
    /// "The current time is ..." rendered at invocation time.
    CurrentTime,
    /// "Today's date is ..." rendered at invocation time.
    CurrentDate,
}

impl Reply {
    /// Create a fixed text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// Render the reply against the given instant.
    pub fn render<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::CurrentTime => format!("The current time is {}.", now.format("%-I:%M:%S %p")),
            Reply::CurrentDate => format!("Today's date is {}.", now.format("%-m/%-d/%Y")),
        }
    }
}

/// A keyword set mapped to a candidate reply and a priority weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRule {
    /// Keywords compared by substring containment.
    pub keywords: Vec<String>,
    /// Reply produced when this rule wins.
    pub reply: Reply,
    /// Higher priorities win over lower ones.
    pub priority: u8,
}

impl IntentRule {
    /// Create a rule from keywords, a reply and a priority.
    pub fn new<I, S>(keywords: I, reply: Reply, priority: u8) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            reply,
            priority,
        }
    }

    /// Whether any keyword occurs in the already-normalized text.
    ///
    /// Keywords are compared literally; only the text side is lowercased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()))
    }
}

/// An ordered, validated sequence of intent rules plus fallback replies.
#[derive(Debug, Clone)]
pub struct IntentTable {
    rules: Vec<IntentRule>,
    fallbacks: Vec<String>,
}

impl IntentTable {
    /// Build a table, rejecting rules that could match every input.
    pub fn new<S>(rules: Vec<IntentRule>, fallbacks: Vec<S>) -> Result<Self, IntentError>
    where
        S: Into<String>,
    {
        for (index, rule) in rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(IntentError::NoKeywords { index });
            }
            if rule.keywords.iter().any(|keyword| keyword.is_empty()) {
                return Err(IntentError::EmptyKeyword { index });
            }
        }

        let fallbacks: Vec<String> = fallbacks.into_iter().map(Into::into).collect();
        if fallbacks.is_empty() {
            return Err(IntentError::NoFallbacks);
        }

        Ok(Self { rules, fallbacks })
    }

    /// Assemble a table whose contents are known to be valid.
    pub(crate) fn from_parts(rules: Vec<IntentRule>, fallbacks: Vec<String>) -> Self {
        Self { rules, fallbacks }
    }

    /// Rules in table order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Fallback replies used when no rule matches.
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// All rules matching the normalized text, in table order.
    pub fn matching<'a, 'b>(&'a self, normalized: &'b str) -> impl Iterator<Item = &'a IntentRule> + 'b
    where
        'a: 'b,
    {
        self.rules.iter().filter(move |rule| rule.matches(normalized))
    }

    /// The winning rule: highest priority, earliest in table order on ties.
    pub fn best_match(&self, normalized: &str) -> Option<&IntentRule> {
        self.rules.iter().filter(|rule| rule.matches(normalized)).fold(None, |best, rule| match best {
            Some(current) if current.priority >= rule.priority => Some(current),
            _ => Some(rule),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rule(keywords: &[&str], text: &str, priority: u8) -> IntentRule {
        IntentRule::new(keywords.iter().copied(), Reply::text(text), priority)
    }

    #[test]
    fn test_rejects_empty_keyword() {
        let result = IntentTable::new(vec![rule(&["hi", ""], "hello", 1)], vec!["?"]);
        assert_eq!(result.unwrap_err(), IntentError::EmptyKeyword { index: 0 });
    }

    #[test]
    fn test_rejects_rule_without_keywords() {
        let rules = vec![rule(&["hi"], "hello", 1), rule(&[], "nothing", 1)];
        let result = IntentTable::new(rules, vec!["?"]);
        assert_eq!(result.unwrap_err(), IntentError::NoKeywords { index: 1 });
    }

    #[test]
    fn test_rejects_missing_fallbacks() {
        let result = IntentTable::new(vec![rule(&["hi"], "hello", 1)], Vec::<String>::new());
        assert_eq!(result.unwrap_err(), IntentError::NoFallbacks);
    }

    #[test]
    fn test_higher_priority_wins_regardless_of_order() {
        let low_first = IntentTable::new(
            vec![rule(&["hello"], "greeting", 1), rule(&["artisan"], "product", 4)],
            vec!["?"],
        )
        .unwrap();
        let high_first = IntentTable::new(
            vec![rule(&["artisan"], "product", 4), rule(&["hello"], "greeting", 1)],
            vec!["?"],
        )
        .unwrap();

        let text = "hello artisan";
        assert_eq!(low_first.best_match(text).unwrap().reply, Reply::text("product"));
        assert_eq!(high_first.best_match(text).unwrap().reply, Reply::text("product"));
    }

    #[test]
    fn test_tie_goes_to_first_rule() {
        let table = IntentTable::new(
            vec![rule(&["leads"], "first", 3), rule(&["leads"], "second", 3)],
            vec!["?"],
        )
        .unwrap();

        assert_eq!(table.best_match("leads").unwrap().reply, Reply::text("first"));
    }

    #[test]
    fn test_winner_outlives_input_text() {
        let table = IntentTable::new(
            vec![rule(&["hello"], "greeting", 1), rule(&["bye"], "farewell", 1)],
            vec!["?"],
        )
        .unwrap();

        let winner = {
            let text = String::from("hello there");
            table.best_match(&text)
        };
        let matched: Vec<&IntentRule> = {
            let text = String::from("hello and bye");
            table.matching(&text).collect()
        };

        assert_eq!(winner.unwrap().reply, Reply::text("greeting"));
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_substring_not_word_match() {
        let r = rule(&["hi"], "hello", 1);
        assert!(r.matches("this"));
        assert!(!r.matches("hello"));
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        let table = IntentTable::new(vec![rule(&["a"], "x", 1)], vec!["?"]).unwrap();
        assert!(table.best_match("").is_none());
    }

    #[test]
    fn test_render_time_and_date() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 15, 4, 5).unwrap();
        assert_eq!(Reply::CurrentTime.render(&now), "The current time is 3:04:05 PM.");
        assert_eq!(Reply::CurrentDate.render(&now), "Today's date is 3/7/2025.");
        assert_eq!(Reply::text("hi").render(&now), "hi");
    }
}
