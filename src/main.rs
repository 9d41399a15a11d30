use anyhow::Result;
use chrono::{Duration, Utc};
use gavel::auction::AuctionItem;
use gavel::clock::SystemClock;
use gavel::persistence::Snapshot;
use gavel::registry::{InMemoryAccountRegistry, RegistryPolicy, User};
use gavel::service::Marketplace;
use gavel::store::InMemoryItemStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

fn snapshot_path() -> PathBuf {
    std::env::var_os("GAVEL_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("gavel-db.json"))
}

/// The seed data the marketplace ships with: one demo account and one
/// sample listing running for a week.
fn seed() -> Snapshot {
    let now = Utc::now();
    Snapshot {
        items: vec![AuctionItem::new(
            "item-1".to_owned(),
            "Sample Item",
            "This is a sample item for testing",
            "https://via.placeholder.com/300x300?text=Sample",
            50,
            now,
            now + Duration::days(7),
            1,
        )],
        users: vec![User {
            id: 1,
            username: "demo".to_owned(),
            email: "demo@example.com".to_owned(),
            password: "demo123".to_owned(),
            is_admin: true,
        }],
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = snapshot_path();
    let snapshot = match Snapshot::load(&path)? {
        Some(snapshot) => {
            info!(path = %path.display(), "loaded snapshot");
            snapshot
        }
        None => {
            info!(path = %path.display(), "no snapshot, starting from seed data");
            seed()
        }
    };

    let store = InMemoryItemStore::new_shared();
    for item in snapshot.items {
        store.create(item)?;
    }
    let registry = Arc::new(InMemoryAccountRegistry::restore(
        RegistryPolicy::default(),
        snapshot.users,
    ));

    let market = Marketplace::new(store.clone(), registry.clone(), SystemClock::new_shared());

    for view in market.list_items() {
        info!(
            id = %view.item.id,
            name = %view.item.name,
            current_bid = view.item.current_bid,
            state = ?view.lifecycle,
            remaining_ms = view.remaining_ms,
            "item"
        );
    }

    Snapshot {
        items: store.list(),
        users: registry.dump(),
    }
    .save(&path)?;

    Ok(())
}
