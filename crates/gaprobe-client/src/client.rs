//! Authenticated HTTP client bound to one API surface.

use gaprobe_auth::AccessToken;
use gaprobe_core::{ApiSurface, Endpoints, Error, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::types::ApiErrorEnvelope;

const USER_AGENT: &str = concat!("gaprobe/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP transport shared by the token exchange and the API calls.
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Transport(format!("cannot initialize HTTP transport: {e}")))
}

/// One transport, one token, one surface.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: Client,
    surface: ApiSurface,
    token: AccessToken,
    base_url: String,
}

impl AnalyticsClient {
    /// Construct a client around an existing transport.
    pub fn with_http(http: Client, token: AccessToken, surface: ApiSurface, endpoints: &Endpoints) -> Self {
        Self {
            http,
            surface,
            token,
            base_url: endpoints.base_for(surface).to_string(),
        }
    }

    /// Fail unless this client was built for `expected`.
    pub(crate) fn require_surface(&self, expected: ApiSurface) -> Result<()> {
        if self.surface == expected {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "client is bound to {}, this call needs {}",
                self.surface, expected
            )))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET {base}/{path}?{query}` decoded as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} ({})", url, self.surface);
        let request = self.http.get(&url).query(query);
        self.execute(request).await
    }

    /// `POST {base}/{path}` with a JSON body, decoded as `T`.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!("POST {} ({})", url, self.surface);
        let request = self.http.post(&url).json(body);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(self.token.secret())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request failed: {e}")))?;

        let response = check_status(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("response read error: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| Error::malformed(format!("unexpected response shape: {e}")))
    }
}

/// Turn a non-2xx response into `Error::Query`, keeping the service's message.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => match envelope.error.status {
            Some(kind) => format!("{}: {}", kind, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.is_empty() => status.canonical_reason().unwrap_or("no body").to_string(),
        Err(_) => body,
    };

    Err(Error::Query {
        status: status.as_u16(),
        message,
    })
}
