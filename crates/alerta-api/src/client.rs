// Incident backend HTTP client
//
// Wraps `reqwest::Client` with backend URL construction, bearer-token
// injection, and the backend's inconsistent failure-body handling. Error
// responses may be JSON on one route and plain text on the next, so raw
// bodies are always captured before any shape is assumed.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::contract::BackendContract;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::wire::{CreateBody, IncidentRecord, LoginFailure, UpdateBody, UserRecord};

/// Async client for the incident backend.
///
/// `base_url` is the backend root including the `/database` segment
/// (e.g. `https://alerta.example.app/database`).
pub struct IncidentClient {
    http: reqwest::Client,
    base_url: Url,
    contract: BackendContract,
    /// Bearer token captured from login, applied to every incident request.
    token: RwLock<Option<String>>,
}

impl IncidentClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a new client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        contract: BackendContract,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            contract,
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, contract: BackendContract) -> Self {
        Self {
            http,
            base_url,
            contract,
            token: RwLock::new(None),
        }
    }

    /// The wire contract this client emits on writes.
    pub fn contract(&self) -> BackendContract {
        self.contract
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Install a session token (from login or from the keyring).
    pub fn set_token(&self, token: String) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Apply the stored bearer token to a request builder.
    fn bearer(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Build a full URL for a backend path: `{base}/{path}`.
    fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Log in with CPF + password at `user/login`.
    ///
    /// The backend is inconsistent about failures: a 4xx with a JSON
    /// `{status, message}` body, a 4xx with plain text, or an HTTP 200
    /// whose body carries `status != "sucesso"`. All three surface as
    /// [`Error::Authentication`] with the backend's own message.
    pub async fn login(&self, cpf: &str, password: &SecretString) -> Result<UserRecord, Error> {
        let url = self.api_url("user/login");
        debug!("POST {url}");

        let body = serde_json::json!({
            "cpf": cpf,
            "pass": password.expose_secret(),
        });

        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Authentication {
                message: login_failure_message(&text),
            });
        }

        // HTTP 200 can still be a failure; check the outcome marker first.
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            let outcome = value.get("status").and_then(Value::as_str);
            if matches!(outcome, Some(s) if s != "sucesso") {
                return Err(Error::Authentication {
                    message: login_failure_message(&text),
                });
            }
        }

        let user: UserRecord = decode(&text)?;
        if let Some(ref token) = user.token {
            self.set_token(token.clone());
        }
        Ok(user)
    }

    // ── Incidents ────────────────────────────────────────────────────

    /// Fetch every incident: `GET occurrence/getall`.
    pub async fn list_incidents(&self) -> Result<Vec<IncidentRecord>, Error> {
        let url = self.api_url("occurrence/getall");
        debug!("GET {url}");

        let resp = self.bearer(self.http.get(url)).send().await?;
        let text = read_ok(resp).await?;
        decode(&text)
    }

    /// Fetch one incident: `GET occurrence/{id}`. Returns `None` on 404.
    pub async fn get_incident(&self, id: i64) -> Result<Option<IncidentRecord>, Error> {
        let url = self.api_url(&format!("occurrence/{id}"));
        debug!("GET {url}");

        let resp = self.bearer(self.http.get(url)).send().await?;
        match read_ok(resp).await {
            Ok(text) => Ok(Some(decode(&text)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create an incident: `POST occurrence/registry`.
    ///
    /// The backend may answer with the created record, or with an empty
    /// body; both count as success.
    pub async fn create_incident(&self, body: &CreateBody) -> Result<Option<IncidentRecord>, Error> {
        let url = self.api_url("occurrence/registry");
        debug!("POST {url}");

        let resp = self.bearer(self.http.post(url).json(body)).send().await?;
        let text = read_ok(resp).await?;

        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&text) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Success with an undecodable body: the write went through,
                // the caller just doesn't get the record back.
                debug!("create response not a record: {e}");
                Ok(None)
            }
        }
    }

    /// Update an incident: `PUT occurrence/{id}`.
    pub async fn update_incident(&self, id: i64, body: &UpdateBody) -> Result<(), Error> {
        let url = self.api_url(&format!("occurrence/{id}"));
        debug!("PUT {url}");

        let resp = self.bearer(self.http.put(url).json(body)).send().await?;
        read_ok(resp).await?;
        Ok(())
    }
}

// ── Response helpers ─────────────────────────────────────────────────

/// Check the status and return the body text, capturing the raw body on
/// any non-2xx response.
async fn read_ok(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::SessionExpired);
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    resp.text().await.map_err(Error::Transport)
}

/// Decode a JSON body, keeping the raw text around for debugging.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|e| {
        let preview = &text[..text.len().min(200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: text.to_owned(),
        }
    })
}

/// Extract the most useful message from a login failure body, whatever its
/// content type turns out to be.
fn login_failure_message(text: &str) -> String {
    if let Ok(failure) = serde_json::from_str::<LoginFailure>(text) {
        if let Some(message) = failure.message {
            return message;
        }
    }
    if text.trim().is_empty() {
        "invalid credentials".to_owned()
    } else {
        text.trim().to_owned()
    }
}
