//! Prometheus counters for the search API.

use labstock_utils::SearchMode;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Debug, Clone)]
pub struct ServiceMetrics {
    registry: Registry,
    searches: IntCounterVec,
    matched_records: IntCounter,
    reorders: IntCounterVec,
}

impl ServiceMetrics {
    pub fn new(namespace: &str) -> prometheus::Result<Self> {
        let registry = Registry::new();

        let searches = IntCounterVec::new(
            Opts::new("searches_total", "Inventory searches by mode").namespace(namespace),
            &["mode"],
        )?;
        let matched_records = IntCounter::with_opts(
            Opts::new("matched_records_total", "Component records returned by searches").namespace(namespace),
        )?;
        let reorders = IntCounterVec::new(
            Opts::new("reorders_total", "Re-order submissions by outcome").namespace(namespace),
            &["outcome"],
        )?;

        registry.register(Box::new(searches.clone()))?;
        registry.register(Box::new(matched_records.clone()))?;
        registry.register(Box::new(reorders.clone()))?;

        Ok(Self {
            registry,
            searches,
            matched_records,
            reorders,
        })
    }

    pub fn record_search(&self, mode: &SearchMode, matched: usize) {
        let label = match mode {
            SearchMode::Content => "content",
            SearchMode::Owner(_) => "owner",
        };
        self.searches.with_label_values(&[label]).inc();
        self.matched_records.inc_by(matched as u64);
    }

    /// `outcome` is one of `recorded`, `rejected` or `failed`
    pub fn record_reorder(&self, outcome: &str) {
        self.reorders.with_label_values(&[outcome]).inc();
    }

    /// Text exposition of every registered metric
    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&self.registry.gather())
            .unwrap_or_else(|_| "Error encoding metrics".to_string())
    }
}
