//! Bid ledger
//!
//! The single mutator of an item's current bid and history. Validation
//! and the append run inside the store's per-item exclusive scope, so
//! two bidders can never both validate against the same stale price and
//! clobber one another.
use crate::auction::{Amount, AuctionItem, BidError, ItemIdRef, LifecycleState, UserId};
use crate::registry::SharedAccountRegistry;
use crate::store::SharedItemStore;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

/// How long `place_bid` waits for a contended item before giving up
/// with [`BidError::Busy`]. Bounded latency over fairness.
pub const DEFAULT_BID_WAIT: Duration = Duration::from_secs(5);

pub struct BidLedger {
    store: SharedItemStore,
    registry: SharedAccountRegistry,
    wait: Duration,
}

impl BidLedger {
    pub fn new(store: SharedItemStore, registry: SharedAccountRegistry) -> Self {
        Self::with_wait(store, registry, DEFAULT_BID_WAIT)
    }

    pub fn with_wait(
        store: SharedItemStore,
        registry: SharedAccountRegistry,
        wait: Duration,
    ) -> Self {
        Self {
            store,
            registry,
            wait,
        }
    }

    /// Validate and apply one bid, returning the post-update snapshot.
    ///
    /// Checks, in order: the item exists, the auction is `Active` at
    /// `now`, the amount strictly beats the current bid (ties never
    /// win), and the bidder resolves to a known user. A failure at any
    /// point leaves the item exactly as it was.
    pub fn place_bid(
        &self,
        item_id: ItemIdRef,
        bidder: UserId,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<AuctionItem, BidError> {
        let registry = &self.registry;

        let res = self.store.mutate(item_id, self.wait, &mut |item| {
            match item.lifecycle(now) {
                LifecycleState::Active => (),
                state => return Err(BidError::AuctionNotActive(state)),
            }
            if amount <= item.current_bid {
                return Err(BidError::BidTooLow {
                    current: item.current_bid,
                });
            }
            if registry.lookup(bidder).is_none() {
                return Err(BidError::InvalidBidder(bidder));
            }

            item.append_bid(bidder, amount, now);
            Ok(())
        });

        match &res {
            Ok(item) => info!(item_id, bidder, amount, current = item.current_bid, "bid accepted"),
            Err(err) => debug!(item_id, bidder, amount, %err, "bid rejected"),
        }
        res
    }
}
