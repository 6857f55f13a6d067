use chrono::{DateTime, Duration, Utc};

use crate::domain::inventory::entities::FoodItem;

/// Items whose effective deadline falls inside this window are flagged.
pub const EXPIRY_ALERT_WINDOW_DAYS: i64 = 3;

/// Resolves the deadline used for urgency checks.
///
/// A detected expiry date wins. Without one, the shelf-life estimate counts
/// forward from the moment the item was added. Items with neither never
/// expire; an estimate landing outside the representable calendar counts as
/// no deadline.
pub fn effective_expiry(item: &FoodItem) -> Option<DateTime<Utc>> {
    if let Some(date) = item.expiry_date {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    item.shelf_life_days
        .filter(|days| *days > 0)
        .and_then(|days| item.added_at.checked_add_signed(Duration::days(days as i64)))
}

/// True when the item's deadline is inside the window. Already-expired items
/// count as expiring too.
pub fn expires_within(item: &FoodItem, now: DateTime<Utc>, window: Duration) -> bool {
    match effective_expiry(item) {
        Some(deadline) => deadline - now < window,
        None => false,
    }
}

pub fn expiring_soon(items: &[FoodItem], now: DateTime<Utc>) -> Vec<&FoodItem> {
    items
        .iter()
        .filter(|item| expires_within(item, now, Duration::days(EXPIRY_ALERT_WINDOW_DAYS)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::entities::{FoodItemDraft, ItemCategory};
    use chrono::NaiveDate;

    fn item(expiry: Option<NaiveDate>, shelf_life: Option<u32>, added_days_ago: i64) -> FoodItem {
        let mut item = FoodItem::new(FoodItemDraft {
            name: "Test".to_string(),
            category: ItemCategory::Fresh,
            expiry_date: expiry,
            shelf_life_days: shelf_life,
            ..Default::default()
        });
        item.added_at -= Duration::days(added_days_ago);
        item
    }

    #[test]
    fn test_no_expiry_and_no_shelf_life_never_expires() {
        let old = item(None, None, 400);
        assert!(!expires_within(&old, Utc::now(), Duration::days(3)));
        assert_eq!(effective_expiry(&old), None);
    }

    #[test]
    fn test_shelf_life_elapsed_is_flagged() {
        // Added three days ago with a two-day shelf life: already past.
        let it = item(None, Some(2), 3);
        assert!(expires_within(&it, Utc::now(), Duration::days(3)));
    }

    #[test]
    fn test_zero_shelf_life_treated_as_absent() {
        let it = item(None, Some(0), 10);
        assert_eq!(effective_expiry(&it), None);
        assert!(!expires_within(&it, Utc::now(), Duration::days(3)));
    }

    #[test]
    fn test_out_of_range_shelf_life_never_expires() {
        // A stored estimate past the calendar's end must read as "no
        // deadline", not abort every listing that touches the item.
        let it = item(None, Some(u32::MAX), 0);
        assert_eq!(effective_expiry(&it), None);
        assert!(!expires_within(&it, Utc::now(), Duration::days(3)));
        assert!(expiring_soon(&[it], Utc::now()).is_empty());
    }

    #[test]
    fn test_far_future_expiry_not_flagged() {
        let next_year = (Utc::now() + Duration::days(365)).date_naive();
        let it = item(Some(next_year), None, 0);
        assert!(!expires_within(&it, Utc::now(), Duration::days(3)));
    }

    #[test]
    fn test_already_expired_date_is_flagged() {
        let yesterday = (Utc::now() - Duration::days(1)).date_naive();
        let it = item(Some(yesterday), None, 5);
        assert!(expires_within(&it, Utc::now(), Duration::days(3)));
    }

    #[test]
    fn test_expiry_date_wins_over_shelf_life() {
        // Shelf life alone would flag it, the detected date says otherwise.
        let next_year = (Utc::now() + Duration::days(365)).date_naive();
        let it = item(Some(next_year), Some(1), 10);
        assert!(!expires_within(&it, Utc::now(), Duration::days(3)));
    }

    #[test]
    fn test_expiring_soon_filters_collection() {
        let safe = item(None, Some(30), 0);
        let urgent = item(None, Some(2), 1);
        let inert = item(None, None, 100);
        let items = vec![safe, urgent, inert];

        let flagged = expiring_soon(&items, Utc::now());
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].shelf_life_days, Some(2));
    }
}
