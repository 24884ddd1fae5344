//! The `Channel` trait — the capability every transport adapter implements.

use async_trait::async_trait;

/// An opaque inbound message as delivered by a channel's transport.
///
/// The shape is channel-native JSON; nothing in the core inspects it.
pub type InboundItem = serde_json::Value;

/// A named communication transport through which outbound responses are sent
/// and (nominally) inbound messages are received.
///
/// Implementations own their credentials; there is no shared base state.
#[async_trait]
pub trait Channel: Send + Sync {
    /// The channel's native name, used in logs.
    fn name(&self) -> &str;

    /// Attempt exactly one delivery via the underlying transport.
    ///
    /// Returns whether the transport reported acceptance. Never retries.
    /// Transport faults are caught here, logged at warn level, and reported
    /// as `false` — no error escapes this boundary.
    async fn send(&self, recipient: &str, text: &str) -> bool;

    /// Inbound items buffered since the last call.
    ///
    /// The carrier and mail adapters have no inbound path and always return
    /// an empty list. The webhook adapter returns a snapshot of its buffer
    /// without clearing it.
    fn receive(&self) -> Vec<InboundItem>;
}
