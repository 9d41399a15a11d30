mod auction;
mod store;

use crate::auction::AuctionItem;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// A fixed reference instant so lifecycle assertions are exact.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// An item starting at [`t0`] and running for a week, starting bid 100.
pub fn week_item(id: &str) -> AuctionItem {
    AuctionItem::new(
        id.to_owned(),
        "Sample Item",
        "This is a sample item for testing",
        "https://example.com/sample.png",
        100,
        t0(),
        t0() + Duration::days(7),
        1,
    )
}
