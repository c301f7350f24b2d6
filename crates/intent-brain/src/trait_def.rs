//! The Responder trait definition.

/// Produces a bot reply for a piece of user text.
///
/// Implementations must never fail: when nothing specific applies they
/// still return some reply. The trait is object-safe and can be used as
/// `Arc<dyn Responder>`.
pub trait Responder: Send + Sync {
    /// Generate the reply for `user_text`.
    fn respond(&self, user_text: &str) -> String;

    /// Get a human-readable name for this responder.
    fn name(&self) -> &str;
}
