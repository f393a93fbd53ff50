//! Client layer: orchestrates validation, transport calls and maps HTTP status codes to errors.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    Account, Credentials, Delivery, DeliveryToken, Schedule, ScheduleId, ScheduleMessage,
    SendMessage, User, UserId, ValidationError,
};

const DEFAULT_BASE_URL: &str = "https://www.elibom.com/";
const API_SOURCE_HEADER: &str = "X-API-Source";
const DEFAULT_API_SOURCE: &str = concat!("rust-", env!("CARGO_PKG_VERSION"));

/// Boxed future returned by [`HttpTransport::send`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
/// Error type produced by an [`HttpTransport`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
/// One outgoing API call as handed to an [`HttpTransport`].
pub struct HttpRequest<'a> {
    pub method: HttpMethod,
    pub url: Url,
    /// JSON body, present for `POST messages` only.
    pub body: Option<String>,
    /// Sent as HTTP Basic auth.
    pub credentials: &'a Credentials,
    pub headers: &'a [(String, String)],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status`, used verbatim in some error messages.
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// The HTTP boundary of [`ElibomClient`].
///
/// Connection handling, TLS, timeouts and retries all live behind this trait.
/// The default implementation is [`ReqwestTransport`]; inject another one with
/// [`ElibomClientBuilder::transport`].
pub trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone, Default)]
/// [`HttpTransport`] backed by a [`reqwest::Client`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, request.url).basic_auth(
                request.credentials.user().as_str(),
                Some(request.credentials.password().expose()),
            );
            for (name, value) in request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            // hyper only records the phrase when it differs from the canonical one.
            let reason = response
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_owned());
            let body = response.text().await?;
            Ok(HttpResponse {
                status: status.as_u16(),
                reason,
                body,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ElibomClient`].
///
/// Validation failures are raised before any request is sent. Non-2xx responses
/// map to exactly one of `BadRequest`, `Unauthorized`, `NotFound`, `ServerError`
/// or `Unknown` (see [`error_for_status`]).
pub enum ElibomError {
    /// An argument was rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP 400.
    #[error("Bad request: {reason}")]
    BadRequest { reason: String },

    /// HTTP 401.
    #[error("Unauthorized, check your credentials")]
    Unauthorized,

    /// HTTP 404.
    #[error("Resource Not found")]
    NotFound,

    /// Any HTTP status of 500 or above.
    #[error("Server error, try later")]
    ServerError { status: u16 },

    /// Any other non-2xx HTTP status.
    #[error("Unknow error: {reason}")]
    Unknown { status: u16, reason: String },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A successful response body could not be read.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// The configured base URL is not an absolute URL that can carry a path.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ElibomError {
    /// HTTP status behind this error, if it came from a response.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized => Some(401),
            Self::NotFound => Some(404),
            Self::ServerError { status } | Self::Unknown { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map a non-2xx HTTP status and its reason phrase to an [`ElibomError`].
pub fn error_for_status(status: u16, reason: &str) -> ElibomError {
    match status {
        400 => ElibomError::BadRequest {
            reason: reason.to_owned(),
        },
        401 => ElibomError::Unauthorized,
        404 => ElibomError::NotFound,
        500.. => ElibomError::ServerError { status },
        _ => ElibomError::Unknown {
            status,
            reason: reason.to_owned(),
        },
    }
}

#[derive(Clone)]
/// Builder for [`ElibomClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent,
/// identifying header or the HTTP transport itself.
pub struct ElibomClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    api_source: String,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ElibomClientBuilder {
    /// Create a builder with the default base URL and `X-API-Source` value.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            api_source: DEFAULT_API_SOURCE.to_owned(),
            transport: None,
        }
    }

    /// Override the API base URL; every path is resolved below it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the `X-API-Source` header value.
    pub fn api_source(mut self, api_source: impl Into<String>) -> Self {
        self.api_source = api_source.into();
        self
    }

    /// Use a custom [`HttpTransport`] instead of the `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build an [`ElibomClient`].
    pub fn build(self) -> Result<ElibomClient, ElibomError> {
        parse_base_url(&self.base_url)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| ElibomError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client)) as Arc<dyn HttpTransport>
            }
        };

        Ok(ElibomClient {
            credentials: self.credentials,
            base_url: self.base_url,
            headers: vec![(API_SOURCE_HEADER.to_owned(), self.api_source)],
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Elibom client.
///
/// Every call validates its arguments, sends one request to
/// `https://www.elibom.com/` (by default) with HTTP Basic credentials and an
/// `X-API-Source` header, and maps non-2xx responses to [`ElibomError`].
/// The client holds no mutable state and can be shared freely.
pub struct ElibomClient {
    credentials: Credentials,
    base_url: String,
    headers: Vec<(String, String)>,
    http: Arc<dyn HttpTransport>,
}

impl ElibomClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`ElibomClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            headers: vec![(API_SOURCE_HEADER.to_owned(), DEFAULT_API_SOURCE.to_owned())],
            http: Arc::new(ReqwestTransport::default()),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ElibomClientBuilder {
        ElibomClientBuilder::new(credentials)
    }

    /// Send `text` to `destination` right away.
    ///
    /// `destination` is one or more comma separated phone numbers (at least 10
    /// digits), contacts (`c<id>`) or groups (`g<id>`).
    ///
    /// Errors:
    /// - [`ValidationError::InvalidDestination`] or [`ValidationError::InvalidText`]
    ///   (wrapped in [`ElibomError::Validation`]) before any request is sent,
    /// - one of the HTTP status errors for non-2xx responses.
    pub async fn send_message(
        &self,
        destination: &str,
        text: &str,
    ) -> Result<DeliveryToken, ElibomError> {
        let request = SendMessage::new(destination, text)?;
        let body = crate::transport::encode_send_message_body(&request);

        let url = self.endpoint(&["messages"])?;
        let response = self.execute(HttpMethod::Post, url, Some(body)).await?;

        crate::transport::decode_send_message_json_response(&response).map_err(parse_error)
    }

    /// Schedule `text` for delivery to `destination` at `scheduled_date`
    /// (`yyyy-MM-dd HH:mm`, local time).
    ///
    /// Validation runs in order: destination, text, date format, date in the future.
    pub async fn schedule_message(
        &self,
        destination: &str,
        text: &str,
        scheduled_date: &str,
    ) -> Result<ScheduleId, ElibomError> {
        let now = chrono::Local::now().naive_local();
        let request = ScheduleMessage::new(destination, text, scheduled_date, now)?;
        let body = crate::transport::encode_schedule_message_body(&request);

        let url = self.endpoint(&["messages"])?;
        let response = self.execute(HttpMethod::Post, url, Some(body)).await?;

        crate::transport::decode_schedule_message_json_response(&response).map_err(parse_error)
    }

    /// Fetch the details of a delivery.
    pub async fn show_delivery(
        &self,
        delivery_token: &DeliveryToken,
    ) -> Result<Delivery, ElibomError> {
        let url = self.endpoint(&["messages", delivery_token.as_str()])?;
        let response = self.execute(HttpMethod::Get, url, None).await?;
        crate::transport::decode_delivery_json_response(&response).map_err(parse_error)
    }

    /// Fetch the details of a scheduled delivery.
    pub async fn show_schedule(&self, schedule_id: &ScheduleId) -> Result<Schedule, ElibomError> {
        let url = self.endpoint(&["schedules", schedule_id.as_str()])?;
        let response = self.execute(HttpMethod::Get, url, None).await?;
        crate::transport::decode_schedule_json_response(&response).map_err(parse_error)
    }

    /// List the scheduled deliveries that have not fired yet.
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, ElibomError> {
        let url = self.endpoint(&["schedules", "scheduled"])?;
        let response = self.execute(HttpMethod::Get, url, None).await?;
        crate::transport::decode_schedules_json_response(&response).map_err(parse_error)
    }

    /// Cancel a scheduled delivery and return its id. The response body is ignored.
    pub async fn cancel_schedule(&self, schedule_id: &ScheduleId) -> Result<ScheduleId, ElibomError> {
        let url = self.endpoint(&["schedules", schedule_id.as_str()])?;
        self.execute(HttpMethod::Delete, url, None).await?;
        Ok(schedule_id.clone())
    }

    pub async fn show_account(&self) -> Result<Account, ElibomError> {
        let url = self.endpoint(&["account"])?;
        let response = self.execute(HttpMethod::Get, url, None).await?;
        crate::transport::decode_account_json_response(&response).map_err(parse_error)
    }

    pub async fn show_user(&self, user_id: &UserId) -> Result<User, ElibomError> {
        let url = self.endpoint(&["users", user_id.as_str()])?;
        let response = self.execute(HttpMethod::Get, url, None).await?;
        crate::transport::decode_user_json_response(&response).map_err(parse_error)
    }

    /// List the users associated with the account.
    pub async fn show_users(&self) -> Result<Vec<User>, ElibomError> {
        let url = self.endpoint(&["users"])?;
        let response = self.execute(HttpMethod::Get, url, None).await?;
        crate::transport::decode_users_json_response(&response).map_err(parse_error)
    }

    // Segments are percent-encoded, so ids can never escape their path slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ElibomError> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ElibomError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<String>,
    ) -> Result<String, ElibomError> {
        debug!(method = method.as_str(), url = %url, "sending request");

        let response = self
            .http
            .send(HttpRequest {
                method,
                url,
                body,
                credentials: &self.credentials,
                headers: &self.headers,
            })
            .await
            .map_err(ElibomError::Transport)?;

        debug!(status = response.status, "received response");

        if !response.is_success() {
            warn!(
                method = method.as_str(),
                status = response.status,
                reason = %response.reason,
                "request failed"
            );
            return Err(error_for_status(response.status, &response.reason));
        }

        Ok(response.body)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ElibomError> {
    let url = Url::parse(base_url)
        .map_err(|err| ElibomError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ElibomError::InvalidBaseUrl(base_url.to_owned()));
    }
    Ok(url)
}

fn parse_error<E>(err: E) -> ElibomError
where
    E: StdError + Send + Sync + 'static,
{
    ElibomError::Parse(Box::new(err))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        calls: usize,
        last_method: Option<HttpMethod>,
        last_url: Option<String>,
        last_body: Option<String>,
        last_headers: Vec<(String, String)>,
        last_user: Option<String>,
        response_status: u16,
        response_reason: String,
        response_body: String,
        fail: bool,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self::with_reason(response_status, "", response_body)
        }

        fn with_reason(
            response_status: u16,
            response_reason: &str,
            response_body: impl Into<String>,
        ) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    calls: 0,
                    last_method: None,
                    last_url: None,
                    last_body: None,
                    last_headers: Vec::new(),
                    last_user: None,
                    response_status,
                    response_reason: response_reason.to_owned(),
                    response_body: response_body.into(),
                    fail: false,
                })),
            }
        }

        fn failing() -> Self {
            let transport = Self::new(200, "");
            transport.state.lock().unwrap().fail = true;
            transport
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }

        fn last_request(&self) -> (Option<HttpMethod>, Option<String>, Option<String>) {
            let state = self.state.lock().unwrap();
            (
                state.last_method,
                state.last_url.clone(),
                state.last_body.clone(),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn send<'a>(
            &'a self,
            request: HttpRequest<'a>,
        ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
            Box::pin(async move {
                let mut state = self.state.lock().unwrap();
                state.calls += 1;
                state.last_method = Some(request.method);
                state.last_url = Some(request.url.to_string());
                state.last_body = request.body;
                state.last_headers = request.headers.to_vec();
                state.last_user = Some(request.credentials.user().as_str().to_owned());
                if state.fail {
                    return Err("connection refused".into());
                }
                Ok(HttpResponse {
                    status: state.response_status,
                    reason: state.response_reason.clone(),
                    body: state.response_body.clone(),
                })
            })
        }
    }

    fn make_client(transport: FakeTransport) -> ElibomClient {
        ElibomClient::builder(Credentials::new("user@example.com", "secret").unwrap())
            .base_url("https://example.invalid/")
            .transport(Arc::new(transport))
            .build()
            .unwrap()
    }

    fn body_json(body: Option<String>) -> Value {
        serde_json::from_str(&body.expect("request body")).unwrap()
    }

    #[tokio::test]
    async fn send_message_posts_payload_and_returns_delivery_token() {
        let transport = FakeTransport::new(200, r#"{"deliveryToken":123}"#);
        let client = make_client(transport.clone());

        let token = client.send_message("573017897304", "hi").await.unwrap();
        assert_eq!(token.as_str(), "123");

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Post));
        assert_eq!(url.as_deref(), Some("https://example.invalid/messages"));
        assert_eq!(
            body_json(body),
            json!({ "destination": "573017897304", "text": "hi" })
        );

        let state = transport.state.lock().unwrap();
        assert_eq!(state.last_user.as_deref(), Some("user@example.com"));
        assert_eq!(
            state.last_headers,
            vec![("X-API-Source".to_owned(), DEFAULT_API_SOURCE.to_owned())]
        );
    }

    #[tokio::test]
    async fn send_message_rejects_bad_destination_without_network_call() {
        let transport = FakeTransport::new(200, r#"{"deliveryToken":123}"#);
        let client = make_client(transport.clone());

        let err = client.send_message("bad-dest", "hi").await.unwrap_err();
        assert!(matches!(
            err,
            ElibomError::Validation(ValidationError::InvalidDestination)
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn send_message_rejects_blank_text_without_network_call() {
        let transport = FakeTransport::new(200, r#"{"deliveryToken":123}"#);
        let client = make_client(transport.clone());

        let err = client.send_message("c12", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            ElibomError::Validation(ValidationError::InvalidText)
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn send_message_maps_missing_token_to_parse_error() {
        let transport = FakeTransport::new(201, r#"{"status":"queued"}"#);
        let client = make_client(transport);

        let err = client.send_message("c12", "hi").await.unwrap_err();
        assert!(matches!(err, ElibomError::Parse(_)));
    }

    #[tokio::test]
    async fn schedule_message_sends_scheduled_date_and_returns_schedule_id() {
        let transport = FakeTransport::new(200, r#"{"scheduleId":"789"}"#);
        let client = make_client(transport.clone());

        let id = client
            .schedule_message("573017897304", "hi", "2099-01-01 00:00")
            .await
            .unwrap();
        assert_eq!(id, ScheduleId::from(789));

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Post));
        assert_eq!(url.as_deref(), Some("https://example.invalid/messages"));
        assert_eq!(
            body_json(body),
            json!({
                "destination": "573017897304",
                "text": "hi",
                "scheduledDate": "2099-01-01 00:00"
            })
        );
    }

    #[tokio::test]
    async fn schedule_message_maps_401_to_unauthorized() {
        let transport = FakeTransport::with_reason(401, "Unauthorized", "");
        let client = make_client(transport.clone());

        let err = client
            .schedule_message("573017897304", "hi", "2099-01-01 00:00")
            .await
            .unwrap_err();
        assert!(matches!(err, ElibomError::Unauthorized));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn schedule_message_rejects_bad_dates_without_network_call() {
        let transport = FakeTransport::new(200, r#"{"scheduleId":1}"#);
        let client = make_client(transport.clone());

        let err = client
            .schedule_message("573017897304", "hi", "2099-01-01")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ElibomError::Validation(ValidationError::InvalidDateFormat)
        ));

        let err = client
            .schedule_message("573017897304", "hi", "2000-01-01 00:00")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ElibomError::Validation(ValidationError::InvalidDateRange)
        ));

        let err = client
            .schedule_message("573017897304", "", "2000-01-01 00:00")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ElibomError::Validation(ValidationError::InvalidText)
        ));

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn show_delivery_returns_whole_body() {
        let json = r#"{"deliveryId":"5077137650034425759","status":"finished","numSent":1}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let delivery = client
            .show_delivery(&DeliveryToken::new("5077137650034425759").unwrap())
            .await
            .unwrap();
        assert_eq!(delivery.get("status"), Some(&json!("finished")));
        assert_eq!(delivery.fields().len(), 3);

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Get));
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/messages/5077137650034425759")
        );
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn identifiers_are_encoded_as_single_path_segment() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        client
            .show_delivery(&DeliveryToken::new("a/b?c").unwrap())
            .await
            .unwrap();

        let (_, url, _) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/messages/a%2Fb%3Fc")
        );
    }

    #[tokio::test]
    async fn show_schedule_and_list_schedules_use_schedule_paths() {
        let transport = FakeTransport::new(200, r#"{"id":5,"text":"hi"}"#);
        let client = make_client(transport.clone());

        let schedule = client.show_schedule(&ScheduleId::from(5)).await.unwrap();
        assert_eq!(schedule.get("text"), Some(&json!("hi")));
        let (_, url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/schedules/5"));

        let transport = FakeTransport::new(200, r#"[{"id":5},{"id":6}]"#);
        let client = make_client(transport.clone());

        let schedules = client.list_schedules().await.unwrap();
        assert_eq!(schedules.len(), 2);
        let (method, url, _) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Get));
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/schedules/scheduled")
        );
    }

    #[tokio::test]
    async fn cancel_schedule_echoes_input_id() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone());

        let id = client.cancel_schedule(&ScheduleId::from(456)).await.unwrap();
        assert_eq!(id.as_str(), "456");

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Delete));
        assert_eq!(url.as_deref(), Some("https://example.invalid/schedules/456"));
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn cancel_schedule_echoes_id_exactly_as_given() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone());

        let given = ScheduleId::new(" 456 ").unwrap();
        let id = client.cancel_schedule(&given).await.unwrap();
        assert_eq!(id.as_str(), " 456 ");
        assert_eq!(id, given);

        let (_, url, _) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/schedules/%20456%20")
        );
    }

    #[tokio::test]
    async fn cancel_schedule_maps_404_to_not_found() {
        let transport = FakeTransport::with_reason(404, "Not Found", "");
        let client = make_client(transport);

        let err = client
            .cancel_schedule(&ScheduleId::from(456))
            .await
            .unwrap_err();
        assert!(matches!(err, ElibomError::NotFound));
        assert_eq!(err.http_status(), Some(404));
    }

    #[tokio::test]
    async fn account_and_user_endpoints() {
        let transport = FakeTransport::new(200, r#"{"name":"ACME","credits":10.5}"#);
        let client = make_client(transport.clone());
        let account = client.show_account().await.unwrap();
        assert_eq!(account.get("credits"), Some(&json!(10.5)));
        let (_, url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/account"));

        let transport = FakeTransport::new(200, r#"{"id":7,"name":"Ann"}"#);
        let client = make_client(transport.clone());
        let user = client.show_user(&UserId::from(7)).await.unwrap();
        assert_eq!(user.id(), Some(UserId::from(7)));
        let (_, url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/users/7"));

        let transport = FakeTransport::new(200, r#"[{"id":7},{"id":8}]"#);
        let client = make_client(transport.clone());
        let users = client.show_users().await.unwrap();
        assert_eq!(users.len(), 2);
        let (_, url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/users"));
    }

    #[tokio::test]
    async fn show_account_maps_server_errors_and_bad_json() {
        let client = make_client(FakeTransport::with_reason(503, "Service Unavailable", ""));
        let err = client.show_account().await.unwrap_err();
        assert!(matches!(err, ElibomError::ServerError { status: 503 }));
        assert_eq!(err.to_string(), "Server error, try later");

        let client = make_client(FakeTransport::new(200, "{ not json }"));
        let err = client.show_account().await.unwrap_err();
        assert!(matches!(err, ElibomError::Parse(_)));
    }

    #[tokio::test]
    async fn transport_failures_are_surfaced() {
        let client = make_client(FakeTransport::failing());
        let err = client.show_users().await.unwrap_err();
        assert!(matches!(err, ElibomError::Transport(_)));
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn error_for_status_covers_every_case() {
        let err = error_for_status(400, "Bad Request");
        assert!(matches!(err, ElibomError::BadRequest { .. }));
        assert_eq!(err.to_string(), "Bad request: Bad Request");

        let err = error_for_status(401, "Unauthorized");
        assert_eq!(err.to_string(), "Unauthorized, check your credentials");

        let err = error_for_status(404, "Not Found");
        assert_eq!(err.to_string(), "Resource Not found");

        for status in [500, 502, 503, 599] {
            let err = error_for_status(status, "whatever");
            assert!(matches!(err, ElibomError::ServerError { status: s } if s == status));
            assert_eq!(err.to_string(), "Server error, try later");
        }

        let err = error_for_status(402, "Payment Required");
        assert!(matches!(err, ElibomError::Unknown { status: 402, .. }));
        assert_eq!(err.to_string(), "Unknow error: Payment Required");

        let err = error_for_status(302, "Found");
        assert_eq!(err.to_string(), "Unknow error: Found");
        assert_eq!(err.http_status(), Some(302));
    }

    #[test]
    fn validation_errors_keep_their_message() {
        let err = ElibomError::from(ValidationError::InvalidText);
        assert_eq!(err.to_string(), ValidationError::InvalidText.to_string());
        assert_eq!(err.http_status(), None);
    }

    #[tokio::test]
    async fn builder_resolves_paths_below_base_url() {
        let transport = FakeTransport::new(200, "{}");
        let client = ElibomClient::builder(Credentials::new("user", "secret").unwrap())
            .base_url("https://example.invalid/api")
            .api_source("rust-test")
            .transport(Arc::new(transport.clone()))
            .build()
            .unwrap();

        client.show_account().await.unwrap();

        let (_, url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/api/account"));
        let state = transport.state.lock().unwrap();
        assert_eq!(
            state.last_headers,
            vec![("X-API-Source".to_owned(), "rust-test".to_owned())]
        );
    }

    #[test]
    fn builder_rejects_unusable_base_urls() {
        let credentials = Credentials::new("user", "secret").unwrap();

        let err = ElibomClient::builder(credentials.clone())
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ElibomError::InvalidBaseUrl(_)));

        let err = ElibomClient::builder(credentials)
            .base_url("mailto:someone@example.com")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ElibomError::InvalidBaseUrl(_)));
    }

    #[test]
    fn default_client_targets_elibom() {
        let client = ElibomClient::new(Credentials::new("user", "secret").unwrap());
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert!(DEFAULT_API_SOURCE.starts_with("rust-"));
        assert_eq!(
            client.endpoint(&["schedules", "scheduled"]).unwrap().as_str(),
            "https://www.elibom.com/schedules/scheduled"
        );
    }
}
