//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MAX_BATCH_RECIPIENTS, SendMessage};
pub use response::{Message, MessageError, SendMessageResponse};
pub use validation::ValidationError;
pub use value::{Credentials, MessageText, RawPhoneNumber};
