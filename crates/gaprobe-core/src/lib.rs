//! gaprobe core — error taxonomy, API surfaces, run configuration.

pub mod config;
pub mod error;
pub mod surface;

pub use config::{Endpoints, ProbeConfig, QueryOverrides};
pub use error::{Error, Result};
pub use surface::ApiSurface;
