//! Shared helpers for integration tests
//!
//! `ScriptedProvider` replays a fixed sequence of pages and records every
//! call, so the lookup pipeline can be exercised without AWS credentials.

#![allow(dead_code)]

use async_trait::async_trait;
use spotprice::error::Result;
use spotprice::fetch::{PricePage, SpotPriceSource};
use spotprice::query::QueryDescriptor;
use spotprice::region::{RegionCatalog, RegionTarget};
use spotprice::SourceProvider;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct CallLog {
    pub tokens: Vec<Option<String>>,
    pub targets: Vec<RegionTarget>,
    pub queries: Vec<QueryDescriptor>,
}

#[derive(Clone)]
pub struct ScriptedProvider {
    pages: Arc<Mutex<VecDeque<PricePage>>>,
    pub log: Arc<Mutex<CallLog>>,
    catalog: RegionCatalog,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new(pages: Vec<PricePage>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages.into())),
            log: Arc::new(Mutex::new(CallLog::default())),
            catalog: RegionCatalog::builtin(),
            delay: None,
        }
    }

    /// Sleep this long before answering each page
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn page_calls(&self) -> usize {
        self.log.lock().unwrap().tokens.len()
    }

    pub fn targets(&self) -> Vec<RegionTarget> {
        self.log.lock().unwrap().targets.clone()
    }
}

struct ScriptedSource {
    provider: ScriptedProvider,
}

#[async_trait]
impl SpotPriceSource for ScriptedSource {
    async fn fetch_page(
        &self,
        query: &QueryDescriptor,
        next_token: Option<String>,
    ) -> Result<PricePage> {
        if let Some(delay) = self.provider.delay {
            tokio::time::sleep(delay).await;
        }
        {
            let mut log = self.provider.log.lock().unwrap();
            log.tokens.push(next_token);
            log.queries.push(query.clone());
        }
        let page = self.provider.pages.lock().unwrap().pop_front();
        Ok(page.unwrap_or_default())
    }
}

#[async_trait]
impl SourceProvider for ScriptedProvider {
    async fn region_catalog(&self) -> Result<RegionCatalog> {
        Ok(self.catalog.clone())
    }

    async fn source_for(&self, target: &RegionTarget) -> Result<Box<dyn SpotPriceSource>> {
        self.log.lock().unwrap().targets.push(target.clone());
        Ok(Box::new(ScriptedSource {
            provider: self.clone(),
        }))
    }
}

pub fn page(prices: &[&str], next_token: Option<&str>) -> PricePage {
    PricePage {
        prices: prices.iter().map(|p| p.to_string()).collect(),
        next_token: next_token.map(str::to_string),
    }
}

/// Pages [5,1,3], [9,2], [4] with the last one ending the chain
pub fn three_pages() -> Vec<PricePage> {
    vec![
        page(&["5", "1", "3"], Some("token-2")),
        page(&["9", "2"], Some("token-3")),
        page(&["4"], None),
    ]
}
