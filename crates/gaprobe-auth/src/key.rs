//! Service-account key files.

use std::io::Read;
use std::path::{Path, PathBuf};

use gaprobe_core::{Error, Result};
use serde::Deserialize;
use tracing::debug;

/// File looked up in the working directory when nothing else is configured.
pub const DEFAULT_KEY_FILE_NAME: &str = "key-service-account-permissions-from-google.json";

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// The parts of a service-account JSON key this tool uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub client_email: String,
    /// PKCS#8 PEM.
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.into()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Read and parse a key file. The file is closed before returning.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            Error::Config(format!("cannot read key file {}: {}", path.display(), e))
        })?;
        debug!("Read {} bytes of key material from {}", bytes.len(), path.display());
        Self::from_slice(&bytes)
    }

    /// Parse key material from an injected stream.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::Config(format!("cannot read key material: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Parse and sanity-check key material.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_slice(bytes)
            .map_err(|e| Error::Credential(format!("malformed service-account key: {}", e)))?;

        if key.key_type != "service_account" {
            return Err(Error::Credential(format!(
                "expected a service_account key, got type \"{}\"",
                key.key_type
            )));
        }
        if key.client_email.trim().is_empty() {
            return Err(Error::Credential("key has an empty client_email".into()));
        }
        if !key.private_key.contains("-----BEGIN") {
            return Err(Error::Credential("private_key is not PEM encoded".into()));
        }

        Ok(key)
    }
}

/// Pick the key file: an explicit path, then `GOOGLE_APPLICATION_CREDENTIALS`,
/// then [`DEFAULT_KEY_FILE_NAME`] in the working directory.
pub fn locate_key_file(explicit: Option<&Path>) -> PathBuf {
    resolve_key_path(explicit, std::env::var_os(CREDENTIALS_ENV).map(PathBuf::from))
}

fn resolve_key_path(explicit: Option<&Path>, from_env: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }
    PathBuf::from(DEFAULT_KEY_FILE_NAME)
}
