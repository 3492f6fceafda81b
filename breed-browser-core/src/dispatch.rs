//! The one seam through which the controller starts a fetch.
//!
//! Dispatch is fire-and-forget: results come back later through
//! `PageController::on_fetch_settled`, in whatever order the network
//! delivers them.

use crate::api::PageSource;
use crate::models::PageFetchResult;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

pub trait FetchDispatcher {
    fn dispatch(&mut self, page: u32);
}

/// Queues dispatched pages until the caller drains them.
///
/// The GUI turns each drained page into a task; tests use it to count fetches.
#[derive(Debug, Clone, Default)]
pub struct PendingFetches {
    pages: Vec<u32>,
}

impl PendingFetches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.pages)
    }

    pub fn pending(&self) -> &[u32] {
        &self.pages
    }
}

impl FetchDispatcher for PendingFetches {
    fn dispatch(&mut self, page: u32) {
        self.pages.push(page);
    }
}

/// A page number paired with the result fetched for it.
pub type SettledFetch = (u32, PageFetchResult);

/// Runs each fetch on its own tokio task and reports back over a channel.
///
/// Must be used from within a tokio runtime. Superseded fetches keep running;
/// only `shutdown` stops them.
pub struct ChannelDispatcher<S: PageSource + 'static> {
    source: Arc<S>,
    settled_tx: UnboundedSender<SettledFetch>,
    settled_rx: UnboundedReceiver<SettledFetch>,
    cancel_token: CancellationToken,
}

impl<S: PageSource + 'static> ChannelDispatcher<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (settled_tx, settled_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            source,
            settled_tx,
            settled_rx,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Wait for the next fetch to settle. `None` once shut down with nothing left.
    pub async fn recv_settled(&mut self) -> Option<SettledFetch> {
        if self.cancel_token.is_cancelled() {
            return self.settled_rx.try_recv().ok();
        }
        self.settled_rx.recv().await
    }

    /// Non-blocking; returns a settled fetch if one is waiting.
    pub fn try_recv_settled(&mut self) -> Option<SettledFetch> {
        self.settled_rx.try_recv().ok()
    }

    /// Abort every outstanding fetch. Used when the screen goes away.
    pub fn shutdown(&self) {
        log::debug!("Shutting down fetch dispatcher");
        self.cancel_token.cancel();
    }
}

impl<S: PageSource + 'static> FetchDispatcher for ChannelDispatcher<S> {
    fn dispatch(&mut self, page: u32) {
        if self.cancel_token.is_cancelled() {
            log::debug!("Dispatcher shut down, dropping fetch for page {}", page);
            return;
        }

        let source = Arc::clone(&self.source);
        let settled_tx = self.settled_tx.clone();
        let cancel_token = self.cancel_token.clone();

        log::debug!("Dispatching fetch for page {}", page);
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    log::debug!("Fetch for page {} cancelled", page);
                }
                result = source.fetch_page(page) => {
                    // Receiver gone means the screen is gone; nothing to report to.
                    let _ = settled_tx.send((page, result));
                }
            }
        });
    }
}
