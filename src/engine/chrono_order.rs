//! Newest-first ordering of dated records.
//!
//! A top-down merge sort: split at the midpoint, order each half, then merge
//! taking the later date first. On equal dates the left element wins, so
//! records sharing a timestamp keep their input order.

use crate::model::Dated;

/// Order `records` by descending date, stable on ties.
pub fn order_by_date_descending<T: Dated>(mut records: Vec<T>) -> Vec<T> {
    if records.len() <= 1 {
        return records;
    }
    let right = records.split_off(records.len() / 2);
    merge(
        order_by_date_descending(records),
        order_by_date_descending(right),
    )
}

fn merge<T: Dated>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // `>=` keeps the left record first on equal dates.
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.dated_at() >= r.dated_at(),
            _ => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
