//! Pagination clamps.
//!
//! Page indices are zero-based internally; user-facing page numbers
//! and selection numbers are 1-based. Out-of-range input clamps to the
//! nearest bound instead of erroring — a deliberate leniency policy.

/// Previous page: floor-clamped decrement.
#[must_use]
pub fn previous(index: i64) -> i64 {
    (index - 1).max(0)
}

/// Next page: ceiling-clamped increment.
#[must_use]
pub fn next(index: i64, max_page_index: i64) -> i64 {
    (index + 1).min(max_page_index)
}

/// Switch to a 1-based page number, clamped into `[0, max_page_index]`.
#[must_use]
pub fn switch_to(one_based: i64, max_page_index: i64) -> i64 {
    (one_based - 1).clamp(0, max_page_index.max(0))
}

/// Clamp a 1-based selection number into `1..=item_count`.
///
/// Callers guarantee a non-empty page (`item_count >= 1`).
#[must_use]
pub fn clamp_selection(number: i64, item_count: i64) -> i64 {
    number.clamp(1, item_count.max(1))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn previous_stops_at_first_page() {
        assert_eq!(previous(0), 0);
        assert_eq!(previous(1), 0);
        assert_eq!(previous(5), 4);
    }

    #[test]
    fn next_stops_at_last_page() {
        assert_eq!(next(0, 3), 1);
        assert_eq!(next(3, 3), 3);
        assert_eq!(next(7, 3), 3);
    }

    #[test]
    fn switch_clamps_both_bounds() {
        assert_eq!(switch_to(1, 4), 0);
        assert_eq!(switch_to(0, 4), 0);
        assert_eq!(switch_to(-3, 4), 0);
        assert_eq!(switch_to(5, 4), 4);
        assert_eq!(switch_to(9999, 4), 4);
    }

    #[test]
    fn selection_clamps_to_page_bounds() {
        assert_eq!(clamp_selection(0, 2), 1);
        assert_eq!(clamp_selection(-7, 2), 1);
        assert_eq!(clamp_selection(3, 2), 2);
        assert_eq!(clamp_selection(2, 2), 2);
    }

    proptest! {
        #[test]
        fn page_index_always_within_bounds(
            index in 0i64..10_000,
            max in 0i64..10_000,
            target in i64::MIN / 2..i64::MAX / 2,
        ) {
            let prev = previous(index);
            prop_assert!(prev >= 0);

            let nxt = next(index.min(max), max);
            prop_assert!((0..=max).contains(&nxt));

            let switched = switch_to(target, max);
            prop_assert!((0..=max).contains(&switched));
        }
    }
}
