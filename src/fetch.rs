//! Paginated spot price history fetching
//!
//! DescribeSpotPriceHistory returns results in pages linked by an opaque
//! `NextToken`. Each call depends on the previous page's token, so the loop is
//! strictly sequential.
//!
//! Only the minimum and maximum of every page are kept. That is enough to
//! derive the global min/max and keeps memory flat for long windows, but it is
//! not enough for any other statistic (median, percentiles).

use crate::error::{Result, SpotPriceError};
use crate::query::QueryDescriptor;
use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::operation::describe_spot_price_history::builders::DescribeSpotPriceHistoryFluentBuilder;
use aws_sdk_ec2::primitives::DateTime as AwsDateTime;
use aws_sdk_ec2::types::{Filter, InstanceType};
use aws_sdk_ec2::Client as Ec2Client;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, info};

/// One page of raw results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricePage {
    /// Prices exactly as the API returned them (decimal strings)
    pub prices: Vec<String>,
    pub next_token: Option<String>,
}

/// Anything that can serve spot price history one page at a time
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    /// Fetch the page following `next_token` (first page when `None`)
    async fn fetch_page(
        &self,
        query: &QueryDescriptor,
        next_token: Option<String>,
    ) -> Result<PricePage>;
}

/// `SpotPriceSource` backed by the EC2 API in one region
#[derive(Debug, Clone)]
pub struct Ec2SpotPriceSource {
    client: Ec2Client,
}

impl Ec2SpotPriceSource {
    pub fn new(client: Ec2Client) -> Self {
        Self { client }
    }
}

fn to_aws_datetime(dt: DateTime<Utc>) -> AwsDateTime {
    AwsDateTime::from_millis(dt.timestamp_millis())
}

/// Request for one page; the zone filter is only attached when zones were given
fn spot_price_request(
    client: &Ec2Client,
    query: &QueryDescriptor,
    next_token: Option<String>,
) -> DescribeSpotPriceHistoryFluentBuilder {
    let window = query.window();
    let request = client
        .describe_spot_price_history()
        .start_time(to_aws_datetime(window.start))
        .end_time(to_aws_datetime(window.end))
        .instance_types(InstanceType::from(query.instance_type()))
        .product_descriptions(query.product_description())
        .set_next_token(next_token);

    match query.zone_filter() {
        Some(zones) => request.filters(
            Filter::builder()
                .name("availability-zone")
                .set_values(Some(zones.to_vec()))
                .build(),
        ),
        None => request,
    }
}

#[async_trait]
impl SpotPriceSource for Ec2SpotPriceSource {
    async fn fetch_page(
        &self,
        query: &QueryDescriptor,
        next_token: Option<String>,
    ) -> Result<PricePage> {
        let request = spot_price_request(&self.client, query, next_token);
        let response = request.send().await.map_err(|e| {
            let message = format!(
                "DescribeSpotPriceHistory failed: {}",
                DisplayErrorContext(&e)
            );
            SpotPriceError::fetch(message, e)
        })?;

        let prices = response
            .spot_price_history()
            .iter()
            .map(|entry| {
                entry.spot_price().map(str::to_string).ok_or_else(|| {
                    SpotPriceError::fetch_msg(format!(
                        "Malformed page: entry without a price (zone: {})",
                        entry.availability_zone().unwrap_or("unknown")
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PricePage {
            prices,
            next_token: response.next_token().map(str::to_string),
        })
    }
}

/// Parse a page's price strings, rejecting anything that is not a finite number
pub fn parse_prices(raw: &[String]) -> Result<Vec<f64>> {
    raw.iter()
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| {
                    SpotPriceError::fetch_msg(format!("Malformed page: invalid price {:?}", s))
                })
        })
        .collect()
}

/// Follow the pagination chain to the end, keeping each page's min and max
///
/// Pages with no entries contribute nothing, so an empty result means the
/// whole window held no prices.
pub async fn fetch_page_extremes<S>(source: &S, query: &QueryDescriptor) -> Result<Vec<f64>>
where
    S: SpotPriceSource + ?Sized,
{
    let started = Instant::now();
    let mut extremes = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;
    let mut entries = 0usize;

    loop {
        let page = source.fetch_page(query, next_token.take()).await?;
        pages += 1;

        let mut prices = parse_prices(&page.prices)?;
        entries += prices.len();
        prices.sort_by(f64::total_cmp);
        if let (Some(min), Some(max)) = (prices.first(), prices.last()) {
            extremes.push(*min);
            extremes.push(*max);
        }

        debug!(
            "FETCH TIME: {:.03} sec (page {}, {} entries)",
            started.elapsed().as_secs_f64(),
            pages,
            prices.len()
        );

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    info!(
        "Fetched {} price entries for {} across {} page(s)",
        entries,
        query.instance_type(),
        pages
    );
    Ok(extremes)
}
