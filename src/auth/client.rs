//! HTTP client for the back-office auth API.
//!
//! ## Endpoints
//!
//! | Method | Path | Body / auth |
//! |--------|------|-------------|
//! | POST | `/api/auth/login` | `{username, password}` |
//! | GET | `/api/auth/verify` | `Authorization: Bearer <token>` |
//! | POST | `/api/auth/register` | user data object |
//!
//! Every response is wrapped as `{success, data, message?}`. Requests are
//! one-shot: no retry, no backoff, no client-side timeout.

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::session::{ModuleAccess, User};
use crate::error::PitbossError;

/// What a successful login hands back, roles already flattened to tags.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginData {
    pub token: String,
    pub user: User,
    pub roles: Vec<String>,
    pub modules: Vec<ModuleAccess>,
}

/// The auth operations the gateway relies on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, PitbossError>;

    /// Check `token` and return the user it belongs to.
    async fn verify(&self, token: &str) -> Result<User, PitbossError>;

    /// Create a user. The API's `data` payload is returned as-is.
    async fn register(
        &self,
        user_data: &serde_json::Value,
    ) -> Result<serde_json::Value, PitbossError>;
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct RawRole {
    role_nombre: String,
}

/// Modules arrive either as bare names or as records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawModule {
    Name(String),
    Record {
        #[serde(alias = "modulo_nombre", alias = "nombre")]
        name: String,
        #[serde(default, alias = "ruta")]
        route: Option<String>,
    },
}

impl From<RawModule> for ModuleAccess {
    fn from(raw: RawModule) -> Self {
        match raw {
            RawModule::Name(name) => ModuleAccess { name, route: None },
            RawModule::Record { name, route } => ModuleAccess { name, route },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLoginData {
    user: User,
    #[serde(default)]
    roles: Vec<RawRole>,
    #[serde(default)]
    modules: Vec<RawModule>,
    token: String,
}

impl From<RawLoginData> for LoginData {
    fn from(raw: RawLoginData) -> Self {
        Self {
            token: raw.token,
            user: raw.user,
            roles: raw.roles.into_iter().map(|r| r.role_nombre).collect(),
            modules: raw.modules.into_iter().map(ModuleAccess::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    user: User,
}

// ============================================================================
// CLIENT
// ============================================================================

/// reqwest-backed [`AuthApi`].
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://10.0.0.5:3000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, PitbossError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pitboss/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PitbossError::Network(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request` and unwrap the `{success, data, message}` envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, PitbossError> {
        let response = request.send().await.map_err(|e| {
            error!(call = what, error = %e, "auth request failed");
            PitbossError::Network(format!("{} request failed: {}", what, e))
        })?;

        let status = response.status();
        let envelope = match response.json::<Envelope<T>>().await {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                error!(call = what, error = %e, "malformed auth response");
                return Err(PitbossError::Network(format!(
                    "{}: malformed response: {}",
                    what, e
                )));
            }
            Err(_) => return Err(status_error(what, status, None)),
        };

        open_envelope(what, status, envelope)
    }
}

/// Take `data` out of an envelope, or classify why there is none.
fn open_envelope<T>(
    what: &str,
    status: StatusCode,
    envelope: Envelope<T>,
) -> Result<T, PitbossError> {
    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } if status.is_success() => {
            debug!(call = what, "auth call succeeded");
            Ok(data)
        }
        Envelope {
            success: true,
            data: None,
            ..
        } if status.is_success() => {
            error!(call = what, "auth response has no data");
            Err(PitbossError::Network(format!(
                "{}: malformed response: missing data",
                what
            )))
        }
        Envelope { message, .. } => Err(status_error(what, status, message)),
    }
}

/// Map a refused call to an error, logging it on the way out.
fn status_error(what: &str, status: StatusCode, message: Option<String>) -> PitbossError {
    let detail = message.unwrap_or_else(|| format!("HTTP {}", status));
    error!(call = what, %status, detail = %detail, "auth call refused");
    if status.is_server_error() {
        PitbossError::Network(format!("{}: {}", what, detail))
    } else {
        PitbossError::Auth(detail)
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, PitbossError> {
        let request = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { username, password });
        let raw: RawLoginData = self.send(request, "login").await?;
        Ok(raw.into())
    }

    async fn verify(&self, token: &str) -> Result<User, PitbossError> {
        let request = self.http.get(self.url("/api/auth/verify")).bearer_auth(token);
        let data: VerifyData = self.send(request, "verify").await?;
        Ok(data.user)
    }

    async fn register(
        &self,
        user_data: &serde_json::Value,
    ) -> Result<serde_json::Value, PitbossError> {
        let request = self.http.post(self.url("/api/auth/register")).json(user_data);
        self.send(request, "register").await
    }
}
