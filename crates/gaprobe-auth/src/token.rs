//! OAuth2 JWT-bearer grant: signed assertion in, bearer token out.

use chrono::{DateTime, Duration, Utc};
use gaprobe_core::{Error, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::ServiceAccountKey;

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Google caps assertion lifetime at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the self-signed assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,   // Service-account email
    pub scope: String, // Space-separated scopes
    pub aud: String,   // Token endpoint
    pub iat: i64,
    pub exp: i64,
}

/// Sign an RS256 assertion for `scopes` with the key's private key.
pub fn build_assertion(key: &ServiceAccountKey, scopes: &[&str], now: DateTime<Utc>) -> Result<String> {
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: scopes.join(" "),
        aud: key.token_uri.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| Error::Credential(format!("unusable private key: {e}")))?;

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    encode(&header, &claims, &signing_key)
        .map_err(|e| Error::Credential(format!("sign assertion: {e}")))
}

/// Short-lived bearer authorization for one run. Never persisted.
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    scopes: Vec<String>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, scopes: Vec<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            scopes,
            expires_at,
        }
    }

    /// The raw bearer value.
    pub fn secret(&self) -> &str {
        &self.token
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Trade a signed assertion for an access token at `key.token_uri`.
pub async fn exchange(client: &Client, key: &ServiceAccountKey, scopes: &[&str]) -> Result<AccessToken> {
    let now = Utc::now();
    let assertion = build_assertion(key, scopes, now)?;

    debug!("Requesting token from {}", key.token_uri);

    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await
        .map_err(|e| Error::Transport(format!("token endpoint unreachable: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = match serde_json::from_str::<TokenErrorBody>(&body) {
            Ok(err) => match err.error_description {
                Some(desc) => format!("{}: {}", err.error, desc),
                None => err.error,
            },
            Err(_) => body,
        };
        return Err(Error::Credential(format!(
            "token exchange rejected ({}): {}",
            status.as_u16(),
            reason
        )));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Credential(format!("unreadable token response: {e}")))?;

    let expires_at = now + Duration::seconds(body.expires_in);
    debug!("Token endpoint granted {} seconds", body.expires_in);

    Ok(AccessToken::new(
        body.access_token,
        scopes.iter().map(|s| s.to_string()).collect(),
        expires_at,
    ))
}
