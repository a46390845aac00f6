#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Outcome of one logical send, possibly aggregated over several batches.
pub struct SendMessageResponse {
    /// `true` when every batch was accepted by the provider.
    pub success: bool,
    /// Raw provider bodies, one per batch, in batch order.
    pub raw_bodies: Vec<String>,
    /// Per-recipient results in batch order.
    pub messages: Vec<Message>,
}

impl SendMessageResponse {
    pub(crate) fn from_batch(raw_body: String, messages: Vec<Message>) -> Self {
        Self {
            success: true,
            raw_bodies: vec![raw_body],
            messages,
        }
    }

    pub(crate) fn append(&mut self, batch: SendMessageResponse) {
        self.success = self.success && batch.success;
        self.raw_bodies.extend(batch.raw_bodies);
        self.messages.extend(batch.messages);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Provider result for a single destination.
pub struct Message {
    /// Provider-assigned message id (`apiMessageId`); absent for rejected entries.
    pub api_message_id: Option<String>,
    /// Destination number as echoed by the provider.
    pub to: String,
    pub accepted: Option<bool>,
    pub error: Option<MessageError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error the provider attached to a single destination.
pub struct MessageError {
    pub code: String,
    pub description: Option<String>,
}
