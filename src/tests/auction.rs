use super::{t0, week_item};
use crate::auction::LifecycleState;
use chrono::Duration;

#[test]
fn lifecycle_boundaries() {
    let item = week_item("foo");
    let end = item.end_time;

    assert_eq!(item.lifecycle(t0() - Duration::seconds(1)), LifecycleState::Pending);
    assert_eq!(item.lifecycle(t0()), LifecycleState::Active);
    assert_eq!(item.lifecycle(end - Duration::milliseconds(1)), LifecycleState::Active);
    // the boundary instant is never ambiguous: ended wins
    assert_eq!(item.lifecycle(end), LifecycleState::Ended);
    assert_eq!(item.lifecycle(end + Duration::days(365)), LifecycleState::Ended);
}

#[test]
fn remaining_is_zero_unless_active() {
    let item = week_item("foo");

    assert_eq!(item.remaining(t0() - Duration::hours(1)), Duration::zero());
    assert_eq!(item.remaining(item.end_time), Duration::zero());
    assert_eq!(
        item.remaining(t0() + Duration::days(6)),
        Duration::days(1)
    );
}

#[test]
fn new_item_current_bid_matches_starting_bid() {
    let item = week_item("foo");
    assert_eq!(item.current_bid, item.starting_bid);
    assert!(item.bid_history.is_empty());
}

#[test]
fn appended_bids_keep_history_consistent() {
    let mut item = week_item("foo");

    item.append_bid(2, 150, t0() + Duration::hours(1));
    item.append_bid(3, 200, t0() + Duration::hours(2));

    assert_eq!(item.current_bid, 200);
    assert_eq!(item.bid_history.len(), 2);
    assert_eq!(item.current_bid, item.bid_history.last().unwrap().amount);
    assert!(item
        .bid_history
        .windows(2)
        .all(|w| w[0].amount < w[1].amount));
}

#[test]
fn history_timestamps_never_go_backwards() {
    let mut item = week_item("foo");

    item.append_bid(2, 150, t0() + Duration::hours(2));
    // a clock reading earlier than the previous bid gets clamped up
    item.append_bid(3, 200, t0() + Duration::hours(1));

    let ts: Vec<_> = item.bid_history.iter().map(|b| b.timestamp).collect();
    assert_eq!(ts[0], ts[1]);
}

#[test]
fn metrics_over_known_history() {
    let mut item = week_item("foo");
    assert_eq!(item.metrics().bid_count, 0);
    assert_eq!(item.metrics().unique_bidders, 0);

    item.append_bid(2, 150, t0() + Duration::hours(1));
    item.append_bid(3, 200, t0() + Duration::hours(2));
    item.append_bid(2, 300, t0() + Duration::hours(3));

    let metrics = item.metrics();
    assert_eq!(metrics.bid_count, 3);
    assert_eq!(metrics.unique_bidders, 2);
    // (300 - 100) / 3
    assert_eq!(metrics.average_increment, 66);
    // 3 bids over a 2 hour span
    assert!((metrics.bids_per_hour - 1.5).abs() < 1e-9);
}
