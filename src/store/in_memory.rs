use super::*;
use crate::auction::{AuctionItem, BidError, CreateError, ItemId, ItemIdRef};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

type Inner = BTreeMap<ItemId, Arc<Mutex<AuctionItem>>>;

/// In-memory item store.
///
/// The outer `RwLock` only guards the key set; each item sits behind its
/// own `Mutex`, which is what serializes bids per item. Readers take an
/// item's lock just long enough to clone a snapshot, so they observe
/// either the pre- or post-bid state, never a torn one.
pub struct InMemoryItemStore {
    items: RwLock<Inner>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::default()),
        }
    }

    pub fn new_shared() -> SharedItemStore {
        Arc::new(Self::new())
    }

    fn entry(&self, item_id: ItemIdRef) -> Option<Arc<Mutex<AuctionItem>>> {
        self.items.read().get(item_id).cloned()
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for InMemoryItemStore {
    fn get(&self, item_id: ItemIdRef) -> Option<AuctionItem> {
        self.entry(item_id).map(|item| item.lock().clone())
    }

    fn list(&self) -> Vec<AuctionItem> {
        // grab the entries first so the map lock is not held while
        // individual items are being locked
        let entries: Vec<_> = self.items.read().values().cloned().collect();
        entries.into_iter().map(|item| item.lock().clone()).collect()
    }

    fn create(&self, item: AuctionItem) -> Result<(), CreateError> {
        if item.end_time <= item.start_time {
            return Err(CreateError::InvalidTimeRange);
        }

        let mut items = self.items.write();
        if items.contains_key(&item.id) {
            return Err(CreateError::DuplicateId(item.id));
        }
        items.insert(item.id.clone(), Arc::new(Mutex::new(item)));
        Ok(())
    }

    fn mutate(
        &self,
        item_id: ItemIdRef,
        wait: Duration,
        f: &mut dyn FnMut(&mut AuctionItem) -> Result<(), BidError>,
    ) -> Result<AuctionItem, BidError> {
        let entry = self
            .entry(item_id)
            .ok_or_else(|| BidError::ItemNotFound(item_id.to_owned()))?;

        let mut item = entry.try_lock_for(wait).ok_or(BidError::Busy)?;
        let before = item.clone();
        match f(&mut item) {
            Ok(()) => Ok(item.clone()),
            Err(err) => {
                // a failed mutation must not leave a partial write
                *item = before;
                Err(err)
            }
        }
    }
}
