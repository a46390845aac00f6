use serde::{Deserialize, Serialize};

use crate::domain::{Message, MessageError, MessageText, RawPhoneNumber};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SendMessageJsonRequest<'a> {
    text: &'a str,
    to: Vec<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendMessageJsonResponse {
    data: SendMessageJsonData,
}

#[derive(Debug, Clone, Deserialize)]
struct SendMessageJsonData {
    #[serde(default)]
    message: Vec<MessageJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageJsonResult {
    #[serde(default)]
    api_message_id: Option<String>,
    to: String,
    #[serde(default)]
    accepted: Option<bool>,
    #[serde(default)]
    error: Option<MessageJsonError>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonError {
    code: TransportCode,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCode {
    String(String),
    Number(serde_json::Number),
}

impl TransportCode {
    fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

pub fn encode_send_message_json(
    text: &MessageText,
    recipients: &[RawPhoneNumber],
) -> Result<String, TransportError> {
    let body = SendMessageJsonRequest {
        text: text.as_str(),
        to: recipients.iter().map(RawPhoneNumber::raw).collect(),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_send_message_json_response(json: &str) -> Result<Vec<Message>, TransportError> {
    let parsed: SendMessageJsonResponse = serde_json::from_str(json)?;

    Ok(parsed
        .data
        .message
        .into_iter()
        .map(|value| Message {
            api_message_id: value.api_message_id,
            to: value.to,
            accepted: value.accepted,
            error: value.error.map(|error| MessageError {
                code: error.code.into_string(),
                description: error.description,
            }),
        })
        .collect())
}
