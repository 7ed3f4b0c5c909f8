//! Region resolution from availability zone hints
//!
//! Zone identifiers are `<region><letter>` (e.g. `us-east-2a`), so the region
//! to query is the first catalog entry that prefixes the first requested zone.
//! Resolution is a pure function of the zones and an explicit `RegionCatalog`;
//! when nothing matches the caller falls back to its ambient region.

use crate::error::{Result, SpotPriceError};
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::Client as Ec2Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Commercial EC2 regions, sorted so prefix matching is deterministic
const BUILTIN_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-7",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "mx-central-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

/// Where the region catalog comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionCatalogSource {
    /// Compiled-in list, no network call
    #[default]
    Builtin,
    /// DescribeRegions against the ambient region
    Discover,
}

/// Ordered list of region identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<String>,
}

impl RegionCatalog {
    /// Catalog in exactly the given order
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_REGIONS.iter().copied())
    }

    /// Ask EC2 for every region it knows about, including opted-out ones
    pub async fn discover(client: &Ec2Client) -> Result<Self> {
        let response = client
            .describe_regions()
            .all_regions(true)
            .send()
            .await
            .map_err(|e| {
                let message = format!("DescribeRegions failed: {}", DisplayErrorContext(&e));
                SpotPriceError::fetch(message, e)
            })?;

        let mut regions: Vec<String> = response
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(str::to_string)
            .collect();
        regions.sort();
        regions.dedup();

        debug!("Discovered {} regions", regions.len());
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// First region in catalog order that prefixes `zone`
    pub fn region_for_zone(&self, zone: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| zone.starts_with(r.as_str()))
            .map(String::as_str)
    }
}

/// Which regional endpoint a lookup should hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionTarget {
    Resolved(String),
    /// Whatever region the SDK default chain (or config override) picks
    Ambient,
}

/// Resolve the region from the first zone hint; never fails
pub fn resolve_region(zones: &[String], catalog: &RegionCatalog) -> RegionTarget {
    let target = zones
        .first()
        .and_then(|zone| catalog.region_for_zone(zone))
        .map(|region| RegionTarget::Resolved(region.to_string()))
        .unwrap_or(RegionTarget::Ambient);

    debug!("REGION: {:?}", target);
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(list: &[&str]) -> Vec<String> {
        list.iter().map(|z| z.to_string()).collect()
    }

    #[test]
    fn test_resolves_region_from_first_zone() {
        let target = resolve_region(&zones(&["us-east-2a", "us-west-1b"]), &RegionCatalog::builtin());
        assert_eq!(target, RegionTarget::Resolved("us-east-2".to_string()));
    }

    #[test]
    fn test_no_zones_is_ambient() {
        assert_eq!(resolve_region(&[], &RegionCatalog::builtin()), RegionTarget::Ambient);
    }

    #[test]
    fn test_unknown_zone_falls_back_to_ambient() {
        let target = resolve_region(&zones(&["xx-nowhere-9a"]), &RegionCatalog::builtin());
        assert_eq!(target, RegionTarget::Ambient);
    }

    #[test]
    fn test_empty_catalog_is_ambient() {
        let catalog = RegionCatalog::new(Vec::<String>::new());
        assert!(catalog.is_empty());
        assert_eq!(resolve_region(&zones(&["us-east-1a"]), &catalog), RegionTarget::Ambient);
    }

    #[test]
    fn test_first_match_in_catalog_order_wins() {
        // "us-east" also prefixes the zone; catalog order decides
        let catalog = RegionCatalog::new(["us-east", "us-east-1"]);
        let target = resolve_region(&zones(&["us-east-1a"]), &catalog);
        assert_eq!(target, RegionTarget::Resolved("us-east".to_string()));
    }

    #[test]
    fn test_local_zone_maps_to_parent_region() {
        let target = resolve_region(&zones(&["us-east-1-bos-1a"]), &RegionCatalog::builtin());
        assert_eq!(target, RegionTarget::Resolved("us-east-1".to_string()));
    }

    #[test]
    fn test_builtin_catalog_is_sorted() {
        let catalog = RegionCatalog::builtin();
        let mut sorted = catalog.regions().to_vec();
        sorted.sort();
        assert_eq!(catalog.regions(), sorted.as_slice());
    }
}
