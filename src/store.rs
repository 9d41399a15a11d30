//! Auction item store
//!
//! The store is the exclusive owner of every [`AuctionItem`] record.
//! Readers only ever get snapshots; the one way to change an item after
//! creation is [`ItemStore::mutate`], the privileged per-item exclusive
//! scope the bid ledger runs its read-validate-append-write sequence in.
mod in_memory;

pub use self::in_memory::*;

use crate::auction::{AuctionItem, BidError, CreateError, ItemIdRef};
use std::sync::Arc;
use std::time::Duration;

pub trait ItemStore: Send + Sync {
    /// Snapshot of one item, or `None` if the id is unknown.
    fn get(&self, item_id: ItemIdRef) -> Option<AuctionItem>;

    /// A stable snapshot of all items, in id order. Mutations that land
    /// after this call are not visible in the returned sequence.
    fn list(&self) -> Vec<AuctionItem>;

    fn create(&self, item: AuctionItem) -> Result<(), CreateError>;

    /// Run `f` inside the item's exclusive scope and return the
    /// post-mutation snapshot.
    ///
    /// At most one mutation per item id runs at a time; different items
    /// never contend. Acquisition waits at most `wait` before giving up
    /// with [`BidError::Busy`]. Once entered, `f` runs to completion —
    /// the scope is released on every exit path, and a failing `f`
    /// leaves the item untouched.
    fn mutate(
        &self,
        item_id: ItemIdRef,
        wait: Duration,
        f: &mut dyn FnMut(&mut AuctionItem) -> Result<(), BidError>,
    ) -> Result<AuctionItem, BidError>;
}

pub type SharedItemStore = Arc<dyn ItemStore>;
