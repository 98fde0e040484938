// ── Product subscriptions ──

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::Snapshot;

/// Live handle on the product collection.
///
/// Holds the snapshot seen last; `changed()` waits for the store to move
/// past it.
pub struct ProductStream {
    seen: Snapshot,
    rx: watch::Receiver<Snapshot>,
}

impl ProductStream {
    pub(crate) fn new(rx: watch::Receiver<Snapshot>) -> Self {
        let seen = Snapshot::clone(&rx.borrow());
        Self { seen, rx }
    }

    /// Collection as of subscription or the last `changed()`.
    pub fn current(&self) -> &Snapshot {
        &self.seen
    }

    /// Collection right now, without marking it seen.
    pub fn latest(&self) -> Snapshot {
        Snapshot::clone(&self.rx.borrow())
    }

    /// Next mutation's snapshot, or `None` after the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        if self.rx.changed().await.is_err() {
            return None;
        }
        self.seen = Snapshot::clone(&self.rx.borrow_and_update());
        Some(Snapshot::clone(&self.seen))
    }

    pub fn into_stream(self) -> ProductWatchStream {
        ProductWatchStream(WatchStream::new(self.rx))
    }
}

/// [`Stream`] of snapshots: the current one first, then one per mutation.
pub struct ProductWatchStream(WatchStream<Snapshot>);

impl Stream for ProductWatchStream {
    type Item = Snapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Snapshot>> {
        Pin::new(&mut self.0).poll_next(cx)
    }
}
