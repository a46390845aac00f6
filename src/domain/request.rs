use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RawPhoneNumber};

/// Most recipients Clickatell accepts in a single `rest/message` call.
pub const MAX_BATCH_RECIPIENTS: usize = 500;

#[derive(Debug, Clone)]
/// One logical send: a message text and the ordered recipients it goes to.
///
/// Invariant: at least one recipient. There is no upper bound; lists longer than
/// [`MAX_BATCH_RECIPIENTS`] are split by the client into [`SendMessage::batches`].
pub struct SendMessage {
    text: MessageText,
    recipients: Vec<RawPhoneNumber>,
}

impl SendMessage {
    /// Build a request from already validated parts.
    pub fn to_many(
        recipients: Vec<RawPhoneNumber>,
        text: MessageText,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }
        Ok(Self { text, recipients })
    }

    /// Validate a plain message and recipient list.
    ///
    /// The message is checked first, so an empty message with no recipients reports
    /// the message.
    pub fn new<I, S>(text: impl Into<String>, recipients: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = MessageText::new(text)?;
        let recipients = recipients
            .into_iter()
            .map(RawPhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::to_many(recipients, text)
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    /// Consecutive recipient chunks of at most [`MAX_BATCH_RECIPIENTS`], in order.
    pub fn batches(&self) -> std::slice::Chunks<'_, RawPhoneNumber> {
        self.recipients.chunks(MAX_BATCH_RECIPIENTS)
    }

    /// Whether this request needs more than one provider call.
    pub fn is_bulk(&self) -> bool {
        self.recipients.len() > MAX_BATCH_RECIPIENTS
    }
}
