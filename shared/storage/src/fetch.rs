//! Inventory Dump Fetcher
//!
//! Downloads inventory dumps over HTTP. Failures never propagate: they come
//! back as the `Failed to fetch file: ...` sentinel text, which the search
//! engine recognises and skips.

use labstock_models::InventorySource;
use labstock_utils::{fetch_failure_message, LabstockResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for inventory dumps
#[derive(Debug, Clone)]
pub struct DumpFetcher {
    client: Client,
}

impl DumpFetcher {
    pub fn new(timeout: Duration) -> LabstockResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Dump text for `source`, or the fetch-failure sentinel.
    ///
    /// Only a `200 OK` counts as success.
    pub async fn fetch(&self, source: &InventorySource) -> String {
        let response = match self.client.get(&source.url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(source = %source.name, error = %error, "Inventory request failed");
                return fetch_failure_message(error);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(source = %source.name, status = status.as_u16(), "Inventory fetch rejected");
            return fetch_failure_message(status.as_u16());
        }

        match response.text().await {
            Ok(text) => {
                debug!(source = %source.name, bytes = text.len(), "Fetched inventory dump");
                text
            }
            Err(error) => {
                warn!(source = %source.name, error = %error, "Failed to read inventory body");
                fetch_failure_message(error)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};
    use labstock_utils::is_fetch_failure;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub(crate) const WORKSHOP_DUMP: &str = "Image: IMG_1.jpg\nP/N: C12345-ND\nCAP CER 22PF 0805\n";

    /// Serves a small inventory on an ephemeral port; returns its address and
    /// a counter of requests made to `/workshop.txt`.
    pub(crate) async fn serve_inventory() -> (SocketAddr, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let router = Router::new()
            .route(
                "/workshop.txt",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        WORKSHOP_DUMP
                    }
                }),
            )
            .route("/missing.txt", get(|| async { (AxumStatus::NOT_FOUND, "no such file") }))
            .route("/moved.txt", get(|| async { (AxumStatus::ACCEPTED, "Image: not final") }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (addr, hits)
    }

    fn fetcher() -> DumpFetcher {
        DumpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let (addr, hits) = serve_inventory().await;
        let source = InventorySource::new("workshop", format!("http://{}/workshop.txt", addr));

        assert_eq!(fetcher().fetch(&source).await, WORKSHOP_DUMP);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_status_becomes_sentinel() {
        let (addr, _) = serve_inventory().await;
        let source = InventorySource::new("federico", format!("http://{}/missing.txt", addr));

        let text = fetcher().fetch(&source).await;
        assert_eq!(text, "Failed to fetch file: 404");
    }

    #[tokio::test]
    async fn test_fetch_requires_ok_status() {
        let (addr, _) = serve_inventory().await;
        let source = InventorySource::new("marcel", format!("http://{}/moved.txt", addr));

        assert_eq!(fetcher().fetch(&source).await, "Failed to fetch file: 202");
    }

    #[tokio::test]
    async fn test_fetch_transport_error_becomes_sentinel() {
        let source = InventorySource::new("hemal", "http://127.0.0.1:9/unreachable.txt");
        assert!(is_fetch_failure(&fetcher().fetch(&source).await));
    }
}
