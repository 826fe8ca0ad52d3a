//! Account → web property → view lookup over the Management API.
//!
//! The walk takes the first entry at every level. An empty level ends the
//! walk with `None`; nothing below it is requested.

use async_trait::async_trait;
use gaprobe_core::{ApiSurface, Result};
use tracing::{info, warn};

use crate::client::AnalyticsClient;
use crate::types::{ManagementItem, ManagementList};

/// The three management listings the resolver needs.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<ManagementItem>>;

    async fn list_web_properties(&self, account_id: &str) -> Result<Vec<ManagementItem>>;

    async fn list_profiles(&self, account_id: &str, web_property_id: &str) -> Result<Vec<ManagementItem>>;
}

#[async_trait]
impl ManagementApi for AnalyticsClient {
    async fn list_accounts(&self) -> Result<Vec<ManagementItem>> {
        self.require_surface(ApiSurface::CoreReporting)?;
        let list: ManagementList = self.get_json("management/accounts", &[]).await?;
        Ok(list.items)
    }

    async fn list_web_properties(&self, account_id: &str) -> Result<Vec<ManagementItem>> {
        self.require_surface(ApiSurface::CoreReporting)?;
        let path = format!("management/accounts/{}/webproperties", account_id);
        let list: ManagementList = self.get_json(&path, &[]).await?;
        Ok(list.items)
    }

    async fn list_profiles(&self, account_id: &str, web_property_id: &str) -> Result<Vec<ManagementItem>> {
        self.require_surface(ApiSurface::CoreReporting)?;
        let path = format!(
            "management/accounts/{}/webproperties/{}/profiles",
            account_id, web_property_id
        );
        let list: ManagementList = self.get_json(&path, &[]).await?;
        Ok(list.items)
    }
}

/// Where the resolved view lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRef {
    pub account_id: String,
    pub web_property_id: String,
    pub profile_id: String,
}

/// Pick the first view of the first property of the first account.
pub async fn resolve_first_profile<A: ManagementApi + ?Sized>(api: &A) -> Result<Option<ProfileRef>> {
    let accounts = api.list_accounts().await?;
    let Some(account) = accounts.into_iter().next() else {
        warn!("No accounts found");
        return Ok(None);
    };

    let properties = api.list_web_properties(&account.id).await?;
    let Some(property) = properties.into_iter().next() else {
        warn!("No Webproperties found");
        return Ok(None);
    };

    let profiles = api.list_profiles(&account.id, &property.id).await?;
    let Some(profile) = profiles.into_iter().next() else {
        warn!("No views (profiles) found");
        return Ok(None);
    };

    info!(
        "Resolved view {} (account {}, property {})",
        profile.id, account.id, property.id
    );
    Ok(Some(ProfileRef {
        account_id: account.id,
        web_property_id: property.id,
        profile_id: profile.id,
    }))
}
