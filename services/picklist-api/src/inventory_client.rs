//! Inventory Service Client
//!
//! HTTP client for the warehouse inventory service's location endpoints.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use picklist_models::{InventoryEntry, InventoryRegion};
use picklist_utils::{InventoryConfig, InventoryService};

pub struct HttpInventoryClient {
    client: Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(config: &InventoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create inventory HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Domestic and international stock live behind separate endpoints.
    pub fn endpoint(&self, region: InventoryRegion) -> String {
        let path = match region {
            InventoryRegion::Domestic => "getlocations",
            InventoryRegion::International => "getintllocations",
        };
        format!("{}/api/inventory/{}", self.base_url, path)
    }
}

#[async_trait]
impl InventoryService for HttpInventoryClient {
    async fn locations(&self, tdgpn: &str, region: InventoryRegion) -> Result<Vec<InventoryEntry>> {
        let response = self
            .client
            .get(self.endpoint(region))
            .query(&[("tdgpn", tdgpn)])
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to query inventory service")?;

        let status = response.status();
        if !status.is_success() {
            bail!("inventory service returned {} for {}", status, tdgpn);
        }

        response
            .json()
            .await
            .context("Failed to parse inventory locations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_per_region() {
        let client = HttpInventoryClient::new(&InventoryConfig {
            base_url: "http://inventory.local/".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();

        assert_eq!(
            client.endpoint(InventoryRegion::Domestic),
            "http://inventory.local/api/inventory/getlocations"
        );
        assert_eq!(
            client.endpoint(InventoryRegion::International),
            "http://inventory.local/api/inventory/getintllocations"
        );
    }
}
