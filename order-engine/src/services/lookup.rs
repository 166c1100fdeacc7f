//! Debounced external lookups with stale-result suppression
//!
//! Search-as-you-type fields (part search, VIN decode) feed keystrokes
//! into a per-field worker. The worker coalesces rapid input into one
//! request after a quiet period, tags each dispatched request with an
//! id, and forwards a response only while its id is still the latest for
//! the field: an old network response must never overwrite a line the
//! user has already changed. Cancellation of an in-flight request is
//! best-effort via superseding, not a hard abort.

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{CatalogPart, VehicleInfo};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Default quiet period before a lookup is dispatched
pub const DEBOUNCE_MS: u64 = 300;

/// Remote part catalog search
#[async_trait]
pub trait PartCatalog: Send + Sync {
    async fn search_parts(&self, query: &str) -> AppResult<Vec<CatalogPart>>;
}

/// Remote VIN decoder
#[async_trait]
pub trait VinDecoder: Send + Sync {
    async fn decode_vin(&self, vin: &str) -> AppResult<VehicleInfo>;
}

/// A lookup service backing one input field
#[async_trait]
pub trait LookupService: Send + Sync + 'static {
    type Output: Send + 'static;
    async fn fetch(&self, query: &str) -> AppResult<Self::Output>;
}

/// Part-search adapter
pub struct PartSearch(pub Arc<dyn PartCatalog>);

#[async_trait]
impl LookupService for PartSearch {
    type Output = Vec<CatalogPart>;

    async fn fetch(&self, query: &str) -> AppResult<Self::Output> {
        self.0.search_parts(query).await
    }
}

/// VIN-decode adapter
pub struct VinLookup(pub Arc<dyn VinDecoder>);

#[async_trait]
impl LookupService for VinLookup {
    type Output = VehicleInfo;

    async fn fetch(&self, query: &str) -> AppResult<Self::Output> {
        self.0.decode_vin(query).await
    }
}

/// Result delivered for the latest request of a field
#[derive(Debug)]
pub struct LookupOutcome<T> {
    pub request_id: Uuid,
    pub query: String,
    pub result: AppResult<T>,
}

/// Handle owned by the input field: feed keystrokes in, receive
/// non-stale outcomes out.
pub struct LookupHandle<T> {
    input_tx: mpsc::UnboundedSender<String>,
    pub results: mpsc::UnboundedReceiver<LookupOutcome<T>>,
}

impl<T> LookupHandle<T> {
    /// Submit the field's current text. Rapid submissions coalesce into
    /// one request after the quiet period.
    pub fn submit(&self, query: impl Into<String>) {
        let _ = self.input_tx.send(query.into());
    }
}

/// Spawn a debounced lookup worker for one input field.
pub fn spawn_debounced_lookup<S: LookupService>(
    service: Arc<S>,
    debounce: Duration,
    shutdown: CancellationToken,
) -> LookupHandle<S::Output> {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (result_tx, results) = mpsc::unbounded_channel();

    tokio::spawn(run_worker(service, debounce, shutdown, input_rx, result_tx));

    LookupHandle { input_tx, results }
}

async fn run_worker<S: LookupService>(
    service: Arc<S>,
    debounce: Duration,
    shutdown: CancellationToken,
    mut input_rx: mpsc::UnboundedReceiver<String>,
    result_tx: mpsc::UnboundedSender<LookupOutcome<S::Output>>,
) {
    let (fetch_tx, mut fetch_rx) =
        mpsc::unbounded_channel::<(Uuid, String, AppResult<S::Output>)>();

    let mut pending: Option<String> = None;
    let mut deadline: Option<Instant> = None;
    let mut latest: Option<Uuid> = None;

    loop {
        let sleep_at = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            _ = shutdown.cancelled() => break,

            _ = sleep_until(sleep_at), if deadline.is_some() => {
                deadline = None;
                if let Some(query) = pending.take() {
                    let request_id = Uuid::new_v4();
                    latest = Some(request_id);

                    let service = service.clone();
                    let fetch_tx = fetch_tx.clone();
                    tokio::spawn(async move {
                        let result = service.fetch(&query).await;
                        let _ = fetch_tx.send((request_id, query, result));
                    });
                }
            }

            input = input_rx.recv() => {
                match input {
                    Some(query) => {
                        pending = Some(query);
                        deadline = Some(Instant::now() + debounce);
                    }
                    // Field gone; stop accepting work
                    None => break,
                }
            }

            Some((request_id, query, result)) = fetch_rx.recv() => {
                if latest == Some(request_id) {
                    let _ = result_tx.send(LookupOutcome { request_id, query, result });
                } else {
                    tracing::debug!(%request_id, query, "Dropping stale lookup response");
                }
            }
        }
    }
}
