use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use num_bigint::BigUint;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::QuoteProvider;
use crate::models::{QuoteRecord, QuoteRequest, TradeType};
use crate::utils::{from_hex_amount, retry};

#[derive(Debug, Default)]
struct Slot {
    /// Outer `None`: no lookup has finished yet.
    result: Option<Option<BigUint>>,
    in_flight: bool,
    /// Set on every new lookup so superseded results are dropped. Unique
    /// across the batcher, so a pruned and re-created slot never matches a
    /// stale lookup.
    epoch: u64,
}

/// Runs one quote lookup per request concurrently and reports each slot's
/// loading/syncing state.
pub struct QuoteBatcher<P: QuoteProvider + 'static> {
    provider: Arc<P>,
    trade_type: TradeType,
    semaphore: Arc<Semaphore>,
    retries: u32,
    retry_delay_ms: u64,
    slots: Arc<Mutex<HashMap<QuoteRequest, Slot>>>,
    epochs: AtomicU64,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl<P: QuoteProvider + 'static> QuoteBatcher<P> {
    pub fn new(provider: P, trade_type: TradeType, concurrency: usize) -> Self {
        Self {
            provider: Arc::new(provider),
            trade_type,
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            retries: 0,
            retry_delay_ms: 0,
            slots: Arc::new(Mutex::new(HashMap::new())),
            epochs: AtomicU64::new(0),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn with_retries(mut self, retries: u32, retry_delay_ms: u64) -> Self {
        self.retries = retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Start lookups for requests that are neither settled nor in flight.
    /// Slots for requests outside `requests` are dropped. Returns how many
    /// lookups were started.
    pub async fn dispatch(&self, requests: &[Option<QuoteRequest>]) -> usize {
        let mut started = Vec::new();
        {
            let mut slots = self.slots.lock().await;
            retain_live(&mut slots, requests);
            for request in requests.iter().flatten() {
                let slot = slots.entry(request.clone()).or_default();
                if slot.in_flight || slot.result.is_some() {
                    continue;
                }
                slot.in_flight = true;
                slot.epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;
                started.push(self.spawn_lookup(request.clone(), slot.epoch));
            }
        }
        let count = started.len();
        self.pending.lock().await.extend(started);
        debug!(started = count, requested = requests.len(), "dispatched quote lookups");
        count
    }

    /// Re-fetch `requests`, keeping previous results on display until the
    /// new ones land. Slots for any other request are dropped.
    pub async fn refresh(&self, requests: &[Option<QuoteRequest>]) -> usize {
        let mut started = Vec::new();
        {
            let mut slots = self.slots.lock().await;
            retain_live(&mut slots, requests);
            let mut seen = HashSet::new();
            for request in requests.iter().flatten() {
                if !seen.insert(request) {
                    continue;
                }
                let slot = slots.entry(request.clone()).or_default();
                if slot.in_flight && slot.result.is_none() {
                    continue;
                }
                slot.in_flight = true;
                slot.epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;
                started.push(self.spawn_lookup(request.clone(), slot.epoch));
            }
        }
        let count = started.len();
        self.pending.lock().await.extend(started);
        debug!(started = count, "refreshing quote lookups");
        count
    }

    /// Wait for every lookup started so far.
    pub async fn wait(&self) {
        let handles: Vec<JoinHandle<()>> = self.pending.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "quote lookup task failed");
            }
        }
    }

    /// Positionally aligned records for `requests` as of now.
    pub async fn snapshot(&self, requests: &[Option<QuoteRequest>]) -> Vec<QuoteRecord> {
        let slots = self.slots.lock().await;
        requests
            .iter()
            .map(|request| {
                let request = match request {
                    Some(r) => r,
                    None => return QuoteRecord::invalid(),
                };
                match slots.get(request) {
                    None => QuoteRecord::loading(),
                    Some(slot) => match (&slot.result, slot.in_flight) {
                        (None, _) => QuoteRecord::loading(),
                        (Some(amount), true) => QuoteRecord::syncing(amount.clone()),
                        (Some(amount), false) => QuoteRecord::settled(amount.clone()),
                    },
                }
            })
            .collect()
    }

    /// Dispatch, wait for every lookup, and return the settled records.
    pub async fn settle(&self, requests: &[Option<QuoteRequest>]) -> Vec<QuoteRecord> {
        self.dispatch(requests).await;
        self.wait().await;
        self.snapshot(requests).await
    }

    fn spawn_lookup(&self, request: QuoteRequest, epoch: u64) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let semaphore = Arc::clone(&self.semaphore);
        let slots = Arc::clone(&self.slots);
        let trade_type = self.trade_type;
        let retries = self.retries;
        let retry_delay_ms = self.retry_delay_ms;

        tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(p) => p,
                Err(_) => return,
            };

            let value = match from_hex_amount(&request.amount) {
                Ok(amount) => {
                    // Run on its own task so a panicking provider still
                    // settles the slot.
                    let lookup_provider = Arc::clone(&provider);
                    let path = request.path.clone();
                    let lookup = tokio::spawn(async move {
                        retry(retries, retry_delay_ms, || {
                            lookup_provider.quote(trade_type, &path, &amount)
                        })
                        .await
                    });
                    match lookup.await {
                        Ok(Ok(value)) => value,
                        Ok(Err(e)) => {
                            warn!(
                                provider = provider.identifier(),
                                path = %request.path,
                                error = %e,
                                "quote lookup failed"
                            );
                            None
                        }
                        Err(e) => {
                            warn!(
                                provider = provider.identifier(),
                                path = %request.path,
                                error = %e,
                                "quote lookup aborted"
                            );
                            None
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "malformed quote request");
                    None
                }
            };

            let mut slots = slots.lock().await;
            if let Some(slot) = slots.get_mut(&request) {
                if slot.epoch == epoch {
                    slot.result = Some(value);
                    slot.in_flight = false;
                }
            }
        })
    }
}

fn retain_live(slots: &mut HashMap<QuoteRequest, Slot>, requests: &[Option<QuoteRequest>]) {
    let live: HashSet<&QuoteRequest> = requests.iter().flatten().collect();
    slots.retain(|request, _| live.contains(request));
}
