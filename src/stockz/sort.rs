//! # Sort Engine
//!
//! Records are reordered in place by one of two quadratic algorithms:
//!
//! - **Bubble sort**: stable, stops after the first pass without a swap, so an
//!   already sorted slice costs a single O(n) pass.
//! - **Selection sort**: not stable. Equal keys may change relative order.
//!
//! Which algorithm runs is part of the observable behaviour, since it decides
//! the order of records with equal keys. A [`SortSpec`] names the field, the
//! algorithm and the direction, and is what the inventory remembers for
//! "repeat last sort".

use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Id,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub algorithm: SortAlgorithm,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, algorithm: SortAlgorithm, order: SortOrder) -> Self {
        Self {
            field,
            algorithm,
            order,
        }
    }

    pub fn price_ascending() -> Self {
        Self::new(SortField::Price, SortAlgorithm::Bubble, SortOrder::Ascending)
    }

    pub fn price_descending() -> Self {
        Self::new(SortField::Price, SortAlgorithm::Selection, SortOrder::Descending)
    }

    pub fn date_ascending() -> Self {
        Self::new(SortField::Date, SortAlgorithm::Bubble, SortOrder::Ascending)
    }

    pub fn date_descending() -> Self {
        Self::new(SortField::Date, SortAlgorithm::Selection, SortOrder::Descending)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Price => write!(f, "Price"),
            SortField::Id => write!(f, "ID"),
            SortField::Date => write!(f, "Date"),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        };
        let algorithm = match self.algorithm {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
        };
        write!(f, "{} ({}, {})", self.field, order, algorithm)
    }
}

/// Ascending comparison of two records on `field`. Incomparable prices
/// (NaN) compare as equal.
pub fn compare(field: SortField, a: &Record, b: &Record) -> Ordering {
    match field {
        SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortField::Id => a.id.cmp(&b.id),
        SortField::Date => a.date.cmp(&b.date),
    }
}

/// Stable bubble sort with early exit.
pub fn bubble_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    if n < 2 {
        return;
    }
    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if cmp(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Selection sort. Picks the first minimal element of the unsorted tail on
/// every pass and swaps it into place.
pub fn selection_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    if n < 2 {
        return;
    }
    for i in 0..n - 1 {
        let mut selected = i;
        for j in i + 1..n {
            if cmp(&items[j], &items[selected]) == Ordering::Less {
                selected = j;
            }
        }
        if selected != i {
            items.swap(i, selected);
        }
    }
}

pub fn apply(spec: SortSpec, records: &mut [Record]) {
    let cmp = |a: &Record, b: &Record| {
        let ord = compare(spec.field, a, b);
        match spec.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    };
    match spec.algorithm {
        SortAlgorithm::Bubble => bubble_sort_by(records, cmp),
        SortAlgorithm::Selection => selection_sort_by(records, cmp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::StockDate;

    fn rec(id: u32, price: f64, date: &str) -> Record {
        Record::new(id, "Item", price, StockDate::parse(date).unwrap(), "Cat")
    }

    fn ids(records: &[Record]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    // Small deterministic generator so the checks below cover many shapes.
    fn scrambled(seed: u64, n: usize) -> Vec<Record> {
        let mut state = seed;
        (0..n)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let price = ((state >> 33) % 50) as f64 + 0.5;
                let day = ((state >> 20) % 28) + 1;
                rec(i as u32 + 1, price, &format!("{:02}/03/2024", day))
            })
            .collect()
    }

    const ALL_SPECS: [SortSpec; 12] = {
        use SortAlgorithm::*;
        use SortField::*;
        use SortOrder::*;
        [
            SortSpec { field: Price, algorithm: Bubble, order: Ascending },
            SortSpec { field: Price, algorithm: Bubble, order: Descending },
            SortSpec { field: Price, algorithm: Selection, order: Ascending },
            SortSpec { field: Price, algorithm: Selection, order: Descending },
            SortSpec { field: Id, algorithm: Bubble, order: Ascending },
            SortSpec { field: Id, algorithm: Bubble, order: Descending },
            SortSpec { field: Id, algorithm: Selection, order: Ascending },
            SortSpec { field: Id, algorithm: Selection, order: Descending },
            SortSpec { field: Date, algorithm: Bubble, order: Ascending },
            SortSpec { field: Date, algorithm: Bubble, order: Descending },
            SortSpec { field: Date, algorithm: Selection, order: Ascending },
            SortSpec { field: Date, algorithm: Selection, order: Descending },
        ]
    };

    #[test]
    fn every_spec_produces_sorted_permutation() {
        for seed in 0..20 {
            let input = scrambled(seed, 17);
            for spec in ALL_SPECS {
                let mut sorted = input.clone();
                apply(spec, &mut sorted);

                for pair in sorted.windows(2) {
                    let ord = compare(spec.field, &pair[0], &pair[1]);
                    match spec.order {
                        SortOrder::Ascending => assert_ne!(ord, Ordering::Greater, "{}", spec),
                        SortOrder::Descending => assert_ne!(ord, Ordering::Less, "{}", spec),
                    }
                }

                let mut before = ids(&input);
                let mut after = ids(&sorted);
                before.sort_unstable();
                after.sort_unstable();
                assert_eq!(before, after, "{} lost or duplicated records", spec);
            }
        }
    }

    #[test]
    fn sorting_sorted_input_is_idempotent() {
        for spec in ALL_SPECS {
            let mut once = scrambled(7, 12);
            apply(spec, &mut once);
            let mut twice = once.clone();
            apply(spec, &mut twice);
            assert_eq!(ids(&once), ids(&twice), "{}", spec);
        }
    }

    #[test]
    fn bubble_sort_keeps_ties_in_place() {
        let mut records = vec![
            rec(1001, 999.0, "15/01/2024"),
            rec(1002, 999.0, "15/01/2024"),
            rec(2001, 1999.0, "20/01/2024"),
        ];
        apply(
            SortSpec::new(SortField::Price, SortAlgorithm::Bubble, SortOrder::Descending),
            &mut records,
        );
        assert_eq!(ids(&records), vec![2001, 1001, 1002]);
    }

    #[test]
    fn selection_sort_may_swap_ties() {
        let mut records = vec![
            rec(1001, 999.0, "15/01/2024"),
            rec(1002, 999.0, "15/01/2024"),
            rec(2001, 1999.0, "20/01/2024"),
        ];
        apply(SortSpec::price_descending(), &mut records);
        assert_eq!(ids(&records), vec![2001, 1002, 1001]);
    }

    #[test]
    fn date_sort_is_chronological_not_lexical() {
        let mut records = vec![
            rec(1, 1.0, "01/02/2024"),
            rec(2, 1.0, "31/01/2024"),
            rec(3, 1.0, "15/12/2023"),
        ];
        apply(SortSpec::date_ascending(), &mut records);
        assert_eq!(ids(&records), vec![3, 2, 1]);
        apply(SortSpec::date_descending(), &mut records);
        assert_eq!(ids(&records), vec![1, 2, 3]);
    }

    #[test]
    fn bubble_sort_exits_early_on_sorted_input() {
        let mut items = vec![1, 2, 3, 4, 5];
        let mut comparisons = 0;
        bubble_sort_by(&mut items, |a, b| {
            comparisons += 1;
            a.cmp(b)
        });
        assert_eq!(comparisons, 4);
    }

    #[test]
    fn tiny_inputs_are_fine() {
        let mut empty: Vec<Record> = Vec::new();
        apply(SortSpec::price_ascending(), &mut empty);
        let mut one = vec![rec(1, 1.0, "01/01/2024")];
        apply(SortSpec::price_descending(), &mut one);
        assert_eq!(ids(&one), vec![1]);
    }

    #[test]
    fn spec_display() {
        assert_eq!(
            SortSpec::price_descending().to_string(),
            "Price (Descending, Selection Sort)"
        );
    }
}
