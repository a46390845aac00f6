//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod logger;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    Credentials, MAX_BATCH_RECIPIENTS, MessageText, RawPhoneNumber, SendMessage,
    SendMessageResponse, ValidationError,
};

pub use logger::{SmsLogger, TracingLogger};

const DEFAULT_SEND_ENDPOINT: &str = "https://api.clickatell.com/rest/message";
const API_VERSION: &str = "1";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Pause between consecutive batches of a bulk send.
pub const DEFAULT_BULK_BATCH_DELAY: Duration = Duration::from_millis(5000);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'static str, String)],
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'static str, String)],
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).body(body);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Coarse classification of a [`ClickatellError`].
pub enum ErrorKind {
    /// The caller supplied an invalid value; nothing was sent.
    Validation,
    /// The provider rejected the request, or it could not be delivered or decoded.
    Provider,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ClickatellClient`].
///
/// Use [`ClickatellError::kind`] to tell caller mistakes from provider failures.
pub enum ClickatellError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, refused connections).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The provider answered with a status other than 200 or 202.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Request or response body could not be (de)serialized.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ClickatellError {
    /// Whether the caller or the provider side caused this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidEndpoint { .. } => ErrorKind::Validation,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Parse(_) => ErrorKind::Provider,
        }
    }

    /// HTTP status returned by the provider, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone)]
/// Builder for [`ClickatellClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, the pause
/// between bulk batches, or attach a logger.
pub struct ClickatellClientBuilder {
    credentials: Credentials,
    send_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    bulk_batch_delay: Duration,
    logger: Option<Arc<dyn SmsLogger>>,
}

impl std::fmt::Debug for ClickatellClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickatellClientBuilder")
            .field("credentials", &self.credentials)
            .field("send_endpoint", &self.send_endpoint)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("bulk_batch_delay", &self.bulk_batch_delay)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl ClickatellClientBuilder {
    /// Create a builder with the default endpoint, the default batch delay and no logger.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            bulk_batch_delay: DEFAULT_BULK_BATCH_DELAY,
            logger: None,
        }
    }

    /// Override the Clickatell endpoint URL for `rest/message`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Pause between consecutive batches when a send exceeds
    /// [`MAX_BATCH_RECIPIENTS`]. Defaults to [`DEFAULT_BULK_BATCH_DELAY`].
    pub fn bulk_batch_delay(mut self, delay: Duration) -> Self {
        self.bulk_batch_delay = delay;
        self
    }

    /// Attach a logger. Without one the client logs nothing.
    pub fn logger(mut self, logger: impl SmsLogger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Build a [`ClickatellClient`].
    pub fn build(self) -> Result<ClickatellClient, ClickatellError> {
        let send_endpoint = Url::parse(&self.send_endpoint).map_err(|source| {
            ClickatellError::InvalidEndpoint {
                endpoint: self.send_endpoint.clone(),
                source,
            }
        })?;

        // Each send gets a fresh connection; nothing is kept idle between calls.
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ClickatellError::Transport(Box::new(err)))?;

        Ok(ClickatellClient {
            credentials: self.credentials,
            send_endpoint,
            bulk_batch_delay: self.bulk_batch_delay,
            logger: self.logger,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Clickatell client.
///
/// This type orchestrates request validation, JSON encoding, batching and response
/// parsing. By default it posts to `https://api.clickatell.com/rest/message`.
///
/// The client holds no mutable state and can be cloned and shared across tasks.
pub struct ClickatellClient {
    credentials: Credentials,
    send_endpoint: Url,
    bulk_batch_delay: Duration,
    logger: Option<Arc<dyn SmsLogger>>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ClickatellClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickatellClient")
            .field("credentials", &self.credentials)
            .field("send_endpoint", &self.send_endpoint.as_str())
            .field("bulk_batch_delay", &self.bulk_batch_delay)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl ClickatellClient {
    /// Create a client with the default settings.
    ///
    /// For more customization, use [`ClickatellClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, ClickatellError> {
        Self::builder(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ClickatellClientBuilder {
        ClickatellClientBuilder::new(credentials)
    }

    /// Validate `text` and `recipients`, then [`send`](Self::send) them.
    ///
    /// Errors:
    /// - Returns [`ClickatellError::Validation`] for an empty message, an empty recipient
    ///   list or a blank recipient. Nothing is sent in that case.
    /// - Otherwise see [`ClickatellClient::send`].
    pub async fn send_message<I, S>(
        &self,
        text: impl Into<String>,
        recipients: I,
    ) -> Result<SendMessageResponse, ClickatellError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = SendMessage::new(text, recipients)?;
        self.send(request).await
    }

    /// Send a message through Clickatell.
    ///
    /// Up to [`MAX_BATCH_RECIPIENTS`] recipients go out in a single request. Longer lists
    /// are sent as consecutive batches, one at a time, with the configured delay between
    /// them. Messages of the aggregated response are in batch order.
    ///
    /// Errors:
    /// - [`ClickatellError::HttpStatus`] for any status other than 200 or 202,
    /// - [`ClickatellError::Transport`] when the request could not be delivered,
    /// - [`ClickatellError::Parse`] when the response body is not the expected JSON.
    ///
    /// The first failing batch ends the send; later batches are not attempted.
    #[tracing::instrument(
        name = "ClickatellClient::send",
        skip_all,
        fields(recipients = request.recipients().len())
    )]
    pub async fn send(&self, request: SendMessage) -> Result<SendMessageResponse, ClickatellError> {
        if !request.is_bulk() {
            return self.send_batch(request.text(), request.recipients()).await;
        }

        self.log_info(&format!(
            "{} recipients exceed the limit of {MAX_BATCH_RECIPIENTS}; sending in batches",
            request.recipients().len()
        ));

        let mut aggregate = SendMessageResponse {
            success: true,
            ..Default::default()
        };
        for (index, batch) in request.batches().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.bulk_batch_delay).await;
            }
            let response = self.send_batch(request.text(), batch).await?;
            aggregate.append(response);
        }

        Ok(aggregate)
    }

    async fn send_batch(
        &self,
        text: &MessageText,
        recipients: &[RawPhoneNumber],
    ) -> Result<SendMessageResponse, ClickatellError> {
        self.log_info(&format!(
            "sending SMS. Message is {}. Phone numbers are {}",
            text.as_str(),
            recipients
                .iter()
                .map(RawPhoneNumber::raw)
                .collect::<Vec<_>>()
                .join(",")
        ));

        let outcome = self.post_batch(text, recipients).await;
        match &outcome {
            Ok(response) => self.log_info(&format!(
                "SMS sent to {} recipient(s). Response is {}",
                response.messages.len(),
                response.raw_bodies.concat()
            )),
            Err(err) => self.log_error(&format!("sending SMS failed: {err}")),
        }
        outcome
    }

    async fn post_batch(
        &self,
        text: &MessageText,
        recipients: &[RawPhoneNumber],
    ) -> Result<SendMessageResponse, ClickatellError> {
        let body = crate::transport::encode_send_message_json(text, recipients)
            .map_err(|err| ClickatellError::Parse(Box::new(err)))?;
        let headers = self.request_headers();

        let response = self
            .http
            .post_json(self.send_endpoint.as_str(), &headers, body)
            .await
            .map_err(ClickatellError::Transport)?;

        if !is_accepted_status(response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(ClickatellError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let messages = crate::transport::decode_send_message_json_response(&response.body)
            .map_err(|err| ClickatellError::Parse(Box::new(err)))?;

        Ok(SendMessageResponse::from_batch(response.body, messages))
    }

    fn request_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", self.credentials.authorization_header()),
            ("X-Version", API_VERSION.to_owned()),
            ("ContentType", JSON_MEDIA_TYPE.to_owned()),
            ("Accept", JSON_MEDIA_TYPE.to_owned()),
            ("Content-Type", JSON_MEDIA_TYPE.to_owned()),
        ]
    }

    fn log_info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.info(message);
        }
    }

    fn log_error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.error(message);
        }
    }
}

fn is_accepted_status(status: u16) -> bool {
    matches!(status, 200 | 202)
}
