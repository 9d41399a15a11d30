//! Auction domain types
//!
//! An [`AuctionItem`] owns its own append-only bid history; everything
//! else (lifecycle state, time remaining, bid metrics) is derived from
//! it and a caller-supplied "now". Nothing here does any locking —
//! exclusive access is the store's job.
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ItemId = String;
pub type ItemIdRef<'a> = &'a str;
pub type UserId = u64;

/// Money in minor currency units.
pub type Amount = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),
    #[error("auction end time must be after its start time")]
    InvalidTimeRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    #[error("unknown item: {0}")]
    ItemNotFound(ItemId),
    #[error("auction is not accepting bids")]
    AuctionNotActive(LifecycleState),
    #[error("bid is too low (current bid: {current})")]
    BidTooLow { current: Amount },
    #[error("unknown bidder: {0}")]
    InvalidBidder(UserId),
    #[error("item is busy, try again")]
    Busy,
}

/// Derived from an item's time bounds and "now"; never stored.
///
/// `Ended` is absorbing, and wins at the exact boundary instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Pending,
    Active,
    Ended,
}

/// A single accepted bid. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: UserId,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub starting_bid: Amount,
    pub current_bid: Amount,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub seller: UserId,
    pub bid_history: Vec<Bid>,
}

impl AuctionItem {
    /// A fresh listing: no bids yet, so the current bid *is* the
    /// starting bid.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        starting_bid: Amount,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        seller: UserId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image: image.into(),
            starting_bid,
            current_bid: starting_bid,
            start_time,
            end_time,
            seller,
            bid_history: vec![],
        }
    }

    pub fn lifecycle(&self, now: DateTime<Utc>) -> LifecycleState {
        if now >= self.end_time {
            LifecycleState::Ended
        } else if now >= self.start_time {
            LifecycleState::Active
        } else {
            LifecycleState::Pending
        }
    }

    /// Time left for bidding. Zero unless the auction is `Active`.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.lifecycle(now) {
            LifecycleState::Active => self.end_time - now,
            _ => Duration::zero(),
        }
    }

    /// Append an accepted bid and move the current bid up.
    ///
    /// Only the bid ledger calls this, from inside the item's exclusive
    /// scope, after validation. The stored timestamp is clamped so the
    /// history stays non-decreasing even if the supplied clock read
    /// earlier than the previous bid's — acceptance order is what
    /// counts, not wall-clock equality.
    pub(crate) fn append_bid(&mut self, bidder: UserId, amount: Amount, now: DateTime<Utc>) {
        let timestamp = match self.bid_history.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.bid_history.push(Bid {
            bidder,
            amount,
            timestamp,
        });
        self.current_bid = amount;
    }

    pub fn metrics(&self) -> BidMetrics {
        let bid_count = self.bid_history.len();

        let mut bidders: Vec<UserId> = self.bid_history.iter().map(|b| b.bidder).collect();
        bidders.sort_unstable();
        bidders.dedup();

        let average_increment = if bid_count == 0 {
            0
        } else {
            // accepted amounts are strictly increasing, so the
            // increments sum to (current - starting)
            (self.current_bid - self.starting_bid) / bid_count as u64
        };

        let bids_per_hour = match (self.bid_history.first(), self.bid_history.last()) {
            (Some(first), Some(last)) if last.timestamp > first.timestamp => {
                let span_secs = (last.timestamp - first.timestamp).num_seconds() as f64;
                bid_count as f64 * 3600.0 / span_secs
            }
            // all bids within one second; call the span an hour floor of one bid
            (Some(_), Some(_)) => bid_count as f64,
            _ => 0.0,
        };

        BidMetrics {
            bid_count,
            unique_bidders: bidders.len(),
            average_increment,
            bids_per_hour,
        }
    }
}

/// Report-only figures over one item's bid history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidMetrics {
    pub bid_count: usize,
    pub unique_bidders: usize,
    pub average_increment: Amount,
    pub bids_per_hour: f64,
}
