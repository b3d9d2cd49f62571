//! HTTP transport to the GraphQL endpoint.
use std::fmt;
use std::future::Future;
use std::time::{Duration, SystemTime};

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const API_KEY_HEADER: &str = "x-api-key";
const SIGNING_SERVICE: &str = "appsync";

/// Sends one GraphQL request body and returns the decoded JSON response.
pub trait Transport {
    fn post(&self, body: &Value) -> impl Future<Output = Result<Value, TransportError>>;
}

// ————————————————————————————————————————————————————————————————————————————
// AUTH
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    ApiKey(String),
    Iam { access_key_id: String, secret_access_key: String },
}

impl fmt::Display for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::ApiKey(_) => f.write_str("API Key"),
            Auth::Iam { .. } => f.write_str("AWS IAM Credentials"),
        }
    }
}

// Keep secrets out of debug logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::ApiKey(_) => f.write_str("ApiKey(..)"),
            Auth::Iam { access_key_id, .. } => f.debug_struct("Iam").field("access_key_id", access_key_id).finish_non_exhaustive(),
        }
    }
}

/// AppSync hosts look like `<id>.appsync-api.<region>.amazonaws.com`.
pub fn region_from_endpoint(endpoint: &Url) -> Option<String> {
    endpoint
        .host_str()?
        .split('.')
        .nth(2)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
struct Signer {
    credentials: Credentials,
    region: String,
}

impl Signer {
    /// Headers to add so the request carries a SigV4 signature.
    fn sign(&self, url: &Url, headers: &HeaderMap, body: &[u8]) -> Result<Vec<(String, String)>, TransportError> {
        let identity: Identity = self.credentials.clone().into();
        let params: aws_sigv4::http_request::SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SIGNING_SERVICE)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| TransportError::Signing(e.to_string()))?
            .into();
        let signable = SignableRequest::new(
            "POST",
            url.as_str(),
            headers
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|value| (name.as_str(), value))),
            SignableBody::Bytes(body),
        )
        .map_err(|e| TransportError::Signing(e.to_string()))?;
        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| TransportError::Signing(e.to_string()))?
            .into_parts();
        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// HTTP
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
    signer: Option<Signer>,
}

impl HttpTransport {
    pub fn new(endpoint: Url, auth: &Auth) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let signer = match auth {
            Auth::ApiKey(key) => {
                let value = HeaderValue::from_str(key).map_err(|_| TransportError::Header(API_KEY_HEADER.to_string()))?;
                headers.insert(API_KEY_HEADER, value);
                None
            }
            Auth::Iam { access_key_id, secret_access_key } => {
                let region = region_from_endpoint(&endpoint).ok_or_else(|| TransportError::Region(endpoint.to_string()))?;
                tracing::debug!(%region, "requests will be SigV4 signed");
                Some(Signer {
                    credentials: Credentials::new(access_key_id, secret_access_key, None, None, "countersync"),
                    region,
                })
            }
        };
        Ok(Self { client: http_client()?, endpoint, headers, signer })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_headers(&self, body: &[u8]) -> Result<HeaderMap, TransportError> {
        let mut headers = self.headers.clone();
        if let Some(signer) = &self.signer {
            for (name, value) in signer.sign(&self.endpoint, &headers, body)? {
                let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| TransportError::Header(name.clone()))?;
                let header_value = HeaderValue::from_str(&value).map_err(|_| TransportError::Header(name.clone()))?;
                headers.insert(header_name, header_value);
            }
        }
        Ok(headers)
    }
}

impl Transport for HttpTransport {
    async fn post(&self, body: &Value) -> Result<Value, TransportError> {
        let bytes = serde_json::to_vec(body).map_err(|e| TransportError::Encode(e.to_string()))?;
        let headers = self.request_headers(&bytes)?;
        tracing::debug!(endpoint = %self.endpoint, "POST graphql request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .body(bytes)
            .send()
            .await
            .map_err(|source| http_error(&self.endpoint, source))?;
        let status = response.status();
        let text = response.text().await.map_err(|source| http_error(&self.endpoint, source))?;
        // GraphQL servers report failures in a JSON body, often with a 4xx status.
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(TransportError::Status { status: status.as_u16(), body: text }),
            Err(e) => Err(TransportError::Decode(e.to_string())),
        }
    }
}

/// GET a page body as text.
pub async fn fetch_page(url: &Url) -> Result<String, TransportError> {
    tracing::debug!(%url, "fetching page");
    let response = http_client()?
        .get(url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| http_error(url, source))?;
    response.text().await.map_err(|source| http_error(url, source))
}

fn http_client() -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| TransportError::Client(source.to_string()))
}

fn http_error(url: &Url, source: reqwest::Error) -> TransportError {
    TransportError::Http { url: url.to_string(), source }
}

// ————————————————————————————————————————————————————————————————————————————
// RESPONSES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Data(Value),
    Errors(Value),
}

impl GraphQlResponse {
    /// Non-object bodies are treated as data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            other => GraphQlResponse { data: Some(other), errors: None },
        }
    }

    pub fn outcome(self) -> Outcome {
        match self.errors {
            Some(errors) if !errors.is_null() => Outcome::Errors(errors),
            _ => Outcome::Data(self.data.unwrap_or(Value::Null)),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
