// ── Reactive product collection ──
//
// Ordered, in-memory mirror of the remote collection with push-based
// change notification via `watch` channels. Every mutation is applied
// atomically to the snapshot and bumps a version counter.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Product, ProductId};

/// Shared, immutable view of the whole collection.
pub type Snapshot = Arc<Vec<Arc<Product>>>;

/// The client's copy of the server's product list.
///
/// No uniqueness is enforced: if the server hands out duplicate ids, the
/// duplicates are kept, and id-based updates and removals touch all of them.
pub struct ProductStore {
    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot in collection order.
    snapshot: watch::Sender<Snapshot>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { version, snapshot }
    }

    /// Replace the whole collection (a successful load).
    pub fn replace_all(&self, products: Vec<Product>) {
        let values: Vec<Arc<Product>> = products.into_iter().map(Arc::new).collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.bump_version();
    }

    /// Append a server-confirmed product at the end.
    pub fn append(&self, product: Product) {
        let product = Arc::new(product);
        self.snapshot.send_modify(|snap| {
            let mut values = Vec::with_capacity(snap.len() + 1);
            values.extend(snap.iter().cloned());
            values.push(product);
            *snap = Arc::new(values);
        });
        self.bump_version();
    }

    /// Swap every product whose id equals `id` for `product`, in place.
    ///
    /// Returns how many entries were replaced. Position is preserved.
    pub fn replace_by_id(&self, id: &ProductId, product: Product) -> usize {
        let product = Arc::new(product);
        let mut replaced = 0;
        self.snapshot.send_if_modified(|snap| {
            let values: Vec<Arc<Product>> = snap
                .iter()
                .map(|p| {
                    if p.id == *id {
                        replaced += 1;
                        Arc::clone(&product)
                    } else {
                        Arc::clone(p)
                    }
                })
                .collect();
            if replaced == 0 {
                return false;
            }
            *snap = Arc::new(values);
            true
        });
        if replaced > 0 {
            self.bump_version();
        }
        replaced
    }

    /// Drop every product whose id equals `id`. Returns how many were removed.
    pub fn remove_by_id(&self, id: &ProductId) -> usize {
        let mut removed = 0;
        self.snapshot.send_if_modified(|snap| {
            let before = snap.len();
            let values: Vec<Arc<Product>> =
                snap.iter().filter(|p| p.id != *id).cloned().collect();
            removed = before - values.len();
            if removed == 0 {
                return false;
            }
            *snap = Arc::new(values);
            true
        });
        if removed > 0 {
            self.bump_version();
        }
        removed
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// Mutation counter; starts at 0.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
