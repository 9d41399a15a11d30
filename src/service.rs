//! Marketplace facade
//!
//! The one surface a presentation layer talks to. It owns the clock, so
//! every call recomputes lifecycle state and time remaining against the
//! same "now", and it only ever hands out views — item snapshots with
//! derived facts attached, and user records with the secret stripped.
use crate::auction::{
    Amount, AuctionItem, BidError, BidMetrics, CreateError, ItemIdRef, LifecycleState, UserId,
};
use crate::clock::SharedClock;
use crate::ledger::BidLedger;
use crate::registry::{AuthError, RegError, SharedAccountRegistry, User};
use crate::store::SharedItemStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item as the presentation layer sees it: the record plus the facts
/// derived from it at the moment of the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionItemView {
    #[serde(flatten)]
    pub item: AuctionItem,
    pub lifecycle: LifecycleState,
    pub remaining_ms: i64,
}

impl AuctionItemView {
    fn derive(item: AuctionItem, now: DateTime<Utc>) -> Self {
        let lifecycle = item.lifecycle(now);
        let remaining_ms = item.remaining(now).num_milliseconds();
        Self {
            item,
            lifecycle,
            remaining_ms,
        }
    }
}

/// A user record without the credential secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSort {
    EndingSoon,
    PriceLowToHigh,
    PriceHighToLow,
    Newest,
}

/// Search/sort parameters for [`Marketplace::search_items`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemQuery {
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    pub sort: Option<ItemSort>,
}

pub struct Marketplace {
    store: SharedItemStore,
    registry: SharedAccountRegistry,
    ledger: BidLedger,
    clock: SharedClock,
}

impl Marketplace {
    pub fn new(store: SharedItemStore, registry: SharedAccountRegistry, clock: SharedClock) -> Self {
        let ledger = BidLedger::new(store.clone(), registry.clone());
        Self {
            store,
            registry,
            ledger,
            clock,
        }
    }

    pub fn create_item(&self, item: AuctionItem) -> Result<(), CreateError> {
        self.store.create(item)
    }

    pub fn list_items(&self) -> Vec<AuctionItemView> {
        let now = self.clock.now();
        self.store
            .list()
            .into_iter()
            .map(|item| AuctionItemView::derive(item, now))
            .collect()
    }

    pub fn search_items(&self, query: &ItemQuery) -> Vec<AuctionItemView> {
        let mut items = self.store.list();

        if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            items.retain(|item| {
                item.name.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
            });
        }

        match query.sort {
            Some(ItemSort::EndingSoon) => items.sort_by_key(|i| i.end_time),
            Some(ItemSort::PriceLowToHigh) => items.sort_by_key(|i| i.current_bid),
            Some(ItemSort::PriceHighToLow) => {
                items.sort_by_key(|i| std::cmp::Reverse(i.current_bid))
            }
            Some(ItemSort::Newest) => items.sort_by_key(|i| std::cmp::Reverse(i.start_time)),
            None => (),
        }

        let now = self.clock.now();
        items
            .into_iter()
            .map(|item| AuctionItemView::derive(item, now))
            .collect()
    }

    pub fn get_item(&self, item_id: ItemIdRef) -> Option<AuctionItemView> {
        let now = self.clock.now();
        self.store
            .get(item_id)
            .map(|item| AuctionItemView::derive(item, now))
    }

    pub fn place_bid(
        &self,
        item_id: ItemIdRef,
        bidder: UserId,
        amount: Amount,
    ) -> Result<AuctionItemView, BidError> {
        let now = self.clock.now();
        self.ledger
            .place_bid(item_id, bidder, amount, now)
            .map(|item| AuctionItemView::derive(item, now))
    }

    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserView, RegError> {
        self.registry
            .register(username, email, password)
            .map(UserView::from)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserView, AuthError> {
        self.registry
            .authenticate(username, password)
            .map(UserView::from)
    }

    /// Report-only statistics over one item's bid history.
    pub fn bid_metrics(&self, item_id: ItemIdRef) -> Result<BidMetrics, BidError> {
        self.store
            .get(item_id)
            .map(|item| item.metrics())
            .ok_or_else(|| BidError::ItemNotFound(item_id.to_owned()))
    }
}
