//! Price lookup service
//!
//! Runs one lookup end to end: validate and build the query, resolve the
//! region, page through the history and aggregate. Every call builds its own
//! query, client and accumulator; the only shared state is read-only
//! configuration.
//!
//! ## Source providers
//!
//! Region discovery and client construction are the only parts that need AWS
//! credentials; both go through `SourceProvider`. Tests plug in a provider
//! that replays scripted pages.

use crate::aggregate::{aggregate, AggregateResult};
use crate::config::Config;
use crate::error::{Result, SpotPriceError};
use crate::event::{normalize_event, render_outcome, response_shape, GatewayEvent};
use crate::fetch::{fetch_page_extremes, Ec2SpotPriceSource, SpotPriceSource};
use crate::query::{QueryDescriptor, RequestParameters};
use crate::region::{resolve_region, RegionCatalog, RegionCatalogSource, RegionTarget};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};

/// Supplies the region catalog and per-region price sources
#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn region_catalog(&self) -> Result<RegionCatalog>;

    async fn source_for(&self, target: &RegionTarget) -> Result<Box<dyn SpotPriceSource>>;
}

/// `SourceProvider` backed by the AWS SDK
pub struct Ec2SourceProvider {
    sdk_config: SdkConfig,
    catalog_source: RegionCatalogSource,
}

impl Ec2SourceProvider {
    /// Load the SDK config once; `region` overrides the default chain
    pub async fn load(region: Option<&str>, catalog_source: RegionCatalogSource) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;
        debug!("Ambient region: {:?}", sdk_config.region());

        Self {
            sdk_config,
            catalog_source,
        }
    }

    pub async fn from_config(config: &Config) -> Self {
        Self::load(config.aws.region.as_deref(), config.aws.region_catalog).await
    }
}

#[async_trait]
impl SourceProvider for Ec2SourceProvider {
    async fn region_catalog(&self) -> Result<RegionCatalog> {
        match self.catalog_source {
            RegionCatalogSource::Builtin => Ok(RegionCatalog::builtin()),
            RegionCatalogSource::Discover => {
                RegionCatalog::discover(&Ec2Client::new(&self.sdk_config)).await
            }
        }
    }

    async fn source_for(&self, target: &RegionTarget) -> Result<Box<dyn SpotPriceSource>> {
        let client = match target {
            RegionTarget::Resolved(region) => {
                let conf = aws_sdk_ec2::config::Builder::from(&self.sdk_config)
                    .region(Region::new(region.clone()))
                    .build();
                Ec2Client::from_conf(conf)
            }
            RegionTarget::Ambient => Ec2Client::new(&self.sdk_config),
        };
        Ok(Box::new(Ec2SpotPriceSource::new(client)))
    }
}

/// Answers price lookups against a `SourceProvider`
pub struct PriceService<P> {
    provider: P,
    deadline: Option<Duration>,
}

impl<P: SourceProvider> PriceService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            deadline: None,
        }
    }

    /// Bound the whole lookup (catalog, every page, aggregation)
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Look up the price for one request
    ///
    /// Input is validated before any network call is made.
    pub async fn quote(&self, params: &RequestParameters) -> Result<AggregateResult> {
        let query = QueryDescriptor::build(params)?;
        debug!("Query: {:?}", query);

        let lookup = async {
            let catalog = self.provider.region_catalog().await?;
            let target = resolve_region(&params.zones, &catalog);
            let source = self.provider.source_for(&target).await?;
            let extremes = fetch_page_extremes(source.as_ref(), &query).await?;
            aggregate(&extremes, params.want_minimum, query.instance_type())
        };

        let result = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, lookup).await.map_err(|_| {
                SpotPriceError::fetch_msg(format!("Lookup deadline exceeded after {:?}", deadline))
            })?,
            None => lookup.await,
        }?;

        info!("Price for {}: {}", query.instance_type(), result);
        Ok(result)
    }

    /// Handle one gateway event and render the response string
    ///
    /// With `httpMethod` every outcome, errors included, becomes an envelope.
    /// Without it errors are returned to the caller.
    pub async fn handle_event(&self, event: &GatewayEvent) -> Result<String> {
        let shape = response_shape(event);
        let outcome = match normalize_event(event) {
            Ok(request) => {
                let span = info_span!(
                    "lookup",
                    instance_type = %request.params.instance_type,
                    requested_log_level = ?request.params.log_level
                );
                self.quote(&request.params).instrument(span).await
            }
            Err(e) => Err(e),
        };
        render_outcome(outcome, shape)
    }
}
