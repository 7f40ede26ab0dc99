//! Helpers for rows produced by `array_agg` over LEFT JOINed children.
//!
//! Postgres hands back one array per child column, aligned by position. When the
//! join matched nothing the aggregate is either NULL or a one-element array that
//! only holds NULL, so emptiness is decided by the first element of the key
//! column rather than by the array length.

use std::ops::Range;

use rust_decimal::Decimal;

/// A nullable Postgres array of nullable elements.
pub type PgArray<T> = Option<Vec<Option<T>>>;

/// Whether the key column of an aggregate carries real children.
pub fn has_children<T>(keys: &PgArray<T>) -> bool {
    matches!(keys.as_deref(), Some([Some(_), ..]))
}

/// Indices to zip across sibling columns; empty when the aggregate matched nothing.
pub fn positions<T>(keys: &PgArray<T>) -> Range<usize> {
    match keys {
        Some(values) if has_children(keys) => 0..values.len(),
        _ => 0..0,
    }
}

/// Element `index` of a sibling column, `None` when absent or NULL.
pub fn at<T: Clone>(column: &PgArray<T>, index: usize) -> Option<T> {
    column
        .as_ref()
        .and_then(|values| values.get(index).cloned().flatten())
}

/// Money element `index`; NULL prices read as zero.
pub fn money_at(column: &PgArray<Decimal>, index: usize) -> Decimal {
    at(column, index).unwrap_or_default()
}

/// The column as a plain list, or `[]` when its first element is NULL.
pub fn present_or_empty<T>(column: PgArray<T>) -> Vec<Option<T>> {
    if has_children(&column) {
        column.unwrap_or_default()
    } else {
        Vec::new()
    }
}

/// Money column with NULL elements read as zero, or `[]` when its first element is NULL.
pub fn money_or_empty(column: PgArray<Decimal>) -> Vec<Decimal> {
    present_or_empty(column)
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_marker_means_no_children() {
        let missing: PgArray<i32> = None;
        let null_marker: PgArray<i32> = Some(vec![None]);
        let empty: PgArray<i32> = Some(vec![]);

        assert!(positions(&missing).is_empty());
        assert!(positions(&null_marker).is_empty());
        assert!(positions(&empty).is_empty());
        assert!(present_or_empty(null_marker).is_empty());
    }

    #[test]
    fn positions_cover_every_child() {
        let ids: PgArray<i32> = Some(vec![Some(3), Some(7), None]);
        assert_eq!(positions(&ids), 0..3);
        assert_eq!(at(&ids, 1), Some(7));
        assert_eq!(at(&ids, 2), None);
        assert_eq!(at(&ids, 9), None);
    }

    #[test]
    fn money_defaults_to_zero() {
        let prices: PgArray<Decimal> = Some(vec![Some(Decimal::new(150_050, 2)), None]);
        assert_eq!(money_at(&prices, 0), Decimal::new(150_050, 2));
        assert_eq!(money_at(&prices, 1), Decimal::ZERO);
        assert_eq!(
            money_or_empty(prices),
            vec![Decimal::new(150_050, 2), Decimal::ZERO]
        );
        assert!(money_or_empty(Some(vec![None])).is_empty());
    }
}
