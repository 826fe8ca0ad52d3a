//! gaprobe client — queries against the analytics APIs.
//!
//! `realtime` and `reporting` issue the two query shapes, `management`
//! resolves a view id, `printer` renders the resulting [`Report`]s and
//! `flows` strings them together for the command line.

pub mod client;
pub mod flows;
pub mod management;
pub mod printer;
pub mod realtime;
pub mod report;
pub mod reporting;
pub mod types;

pub use client::{build_http_client, AnalyticsClient};
pub use flows::RealtimeOutput;
pub use management::{resolve_first_profile, ManagementApi, ProfileRef};
pub use realtime::{query_realtime, RealtimeQuery};
pub use report::{ColumnHeader, Report, ReportRow};
pub use reporting::{batch_get, ReportQuery};
pub use types::DateRange;
