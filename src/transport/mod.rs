//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_message;

pub use send_message::{decode_send_message_json_response, encode_send_message_json};
