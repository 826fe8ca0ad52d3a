//! gaprobe auth — service-account credentials.
//!
//! Reads a Google service-account key, signs an RS256 assertion with it and
//! trades that assertion at the key's token endpoint for a short-lived
//! bearer token scoped to one API surface.

pub mod key;
pub mod token;

pub use key::{locate_key_file, ServiceAccountKey, DEFAULT_KEY_FILE_NAME};
pub use token::{build_assertion, exchange, AccessToken};
