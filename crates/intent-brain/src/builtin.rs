//! The built-in product intent table.

use crate::rule::{IntentRule, IntentTable, Reply};

/// Replies chosen at random when no rule matches.
pub const FALLBACK_REPLIES: [&str; 4] = [
    "I'm not sure I understand. Could you rephrase that?",
    "That's interesting! Tell me more.",
    "I don't have an answer for that yet, but I'm learning!",
    "Can you clarify your question? I'd love to help.",
];

fn builtin_rules() -> Vec<IntentRule> {
    vec![
        // Product intents
        IntentRule::new(
            ["automate", "outbound", "all-in-one", "ai-first platform"],
            Reply::text("I can help you in automating your outbound an All-In-One, AI-First Platform powered by AI Employees"),
            4,
        ),
        IntentRule::new(
            ["sales", "marketing", "customer-success"],
            Reply::text("I can do help you in Sales, Marketing & Customer success"),
            4,
        ),
        IntentRule::new(
            ["artisan"],
            Reply::text("Artisan is a tech startup building future of software with AI emplooyees called Artisan"),
            4,
        ),
        IntentRule::new(
            ["gtm ", "artisan", "outbound"],
            Reply::text("Artisan is replacing, optimizing, and automating the entire GTM stack with AI and world-class software products"),
            4,
        ),
        IntentRule::new(
            ["analytics", "artisan", "sales"],
            Reply::text("Artisan AI employees can do sales and share the outbound analytics"),
            3,
        ),
        // Mixed-case keywords never occur in lowercased text, so this rule is inert.
        IntentRule::new(
            ["AI", "BDR", "Ava"],
            Reply::text("Ava is the first Artisan. She is our AI BDR?"),
            3,
        ),
        IntentRule::new(
            ["leads", "find"],
            Reply::text("Yes, I can also find leads. I identifies leads that match your targeting criteria with her international B2B database that has over 300M contacts in over 200 countries."),
            3,
        ),
        IntentRule::new(
            ["leads", "researches"],
            Reply::text("Yes, I can also researches leads. I scrapes the web and her database for relevant intent signals, such as fundraising announcements, Google searches, and hiring news."),
            3,
        ),
        IntentRule::new(
            ["email", "write"],
            Reply::text("Yes, I Ghostwrites Hyper-Personalized Emails."),
            3,
        ),
        IntentRule::new(
            ["schedule", "call", "meeting"],
            Reply::text("I can help you schedule a call. What date and time do you prefer?"),
            3,
        ),
        // Support
        IntentRule::new(
            ["help", "support", "assist"],
            Reply::text("Sure! I can help with FAQs, troubleshooting, or general inquiries."),
            2,
        ),
        // Small talk
        IntentRule::new(
            ["hello", "hi", "hey"],
            Reply::text("Hello! How can I assist you today?"),
            1,
        ),
        IntentRule::new(
            ["bye", "goodbye"],
            Reply::text("Goodbye! Feel free to reach out anytime."),
            1,
        ),
        IntentRule::new(
            ["thanks", "great"],
            Reply::text("Thanks! Let me know in case I can help you."),
            1,
        ),
        IntentRule::new(
            ["weather"],
            Reply::text("I can't provide live weather updates, but you can check Weather.com!"),
            1,
        ),
        IntentRule::new(["time"], Reply::CurrentTime, 1),
        IntentRule::new(["date"], Reply::CurrentDate, 1),
        IntentRule::new(
            ["joke"],
            Reply::text("Why did the scarecrow win an award? Because he was outstanding in his field!"),
            1,
        ),
    ]
}

/// The product intent table shipped with the API.
pub fn builtin_table() -> IntentTable {
    IntentTable::from_parts(builtin_rules(), FALLBACK_REPLIES.iter().map(|s| s.to_string()).collect())
}
